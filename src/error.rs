use anyhow::anyhow;

pub type Result<T> = std::result::Result<T, LibError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    CrossProject,
    Cycle,
    Database,
    Forbidden,
    InvalidInput,
    NotEmpty,
    NotFound,
    Unknown,
}

#[derive(Debug)]
pub struct LibError {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub public: &'static str,
    pub source: anyhow::Error,
}

impl LibError {
    pub fn database(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::Database,
            code: "database_error",
            public,
            source,
        }
    }

    pub fn invalid(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            code: "invalid_input",
            public,
            source,
        }
    }

    pub fn invalid_with_code(
        code: &'static str,
        public: &'static str,
        source: anyhow::Error,
    ) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            code,
            public,
            source,
        }
    }

    pub fn forbidden(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::Forbidden,
            code: "forbidden",
            public,
            source,
        }
    }

    pub fn not_found(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            code: "not_found",
            public,
            source,
        }
    }

    pub fn already_exists(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::AlreadyExists,
            code: "already_exists",
            public,
            source,
        }
    }

    pub fn cycle(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::Cycle,
            code: "hierarchy_cycle",
            public,
            source,
        }
    }

    pub fn cross_project(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::CrossProject,
            code: "cross_project_link",
            public,
            source,
        }
    }

    pub fn not_empty(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::NotEmpty,
            code: "group_not_empty",
            public,
            source,
        }
    }

    pub fn unknown(public: &'static str, source: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            code: "unknown_error",
            public,
            source,
        }
    }

    pub fn message(public: &'static str) -> Self {
        Self::unknown(public, anyhow!(public))
    }
}

use async_graphql::{Error as GraphQLError, ErrorExtensions};
use thiserror::Error;

/// Failure raised at the follow-service client boundary, before
/// classification.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a failure envelope. `code` carries the
    /// upstream's machine-readable code verbatim when it sent one.
    #[error("Follow Service Error: {message}")]
    Rejected { message: String, code: Option<String> },

    /// The request never produced a decodable response.
    #[error("Failed to communicate with Follow Service")]
    Transport(#[from] reqwest::Error),

    /// A success reply whose envelope carried no payload where one is
    /// required.
    #[error("Follow Service returned an empty response")]
    EmptyEnvelope,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot follow yourself")]
    SelfFollow(#[source] UpstreamError),

    #[error("Already following this user")]
    DuplicateFollow(#[source] UpstreamError),

    #[error("User not found")]
    UserNotFound(#[source] UpstreamError),

    #[error("Resource not found")]
    NotFound(#[source] UpstreamError),

    /// Upstream-reported failure that matched no known category; surfaces
    /// the upstream message as-is.
    #[error("{0}")]
    FollowService(#[source] UpstreamError),

    #[error("An unexpected error occurred")]
    Internal(#[source] UpstreamError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Category {
    SelfFollow,
    DuplicateFollow,
    UserNotFound,
    NotFound,
    Service,
    Internal,
}

/// Substring patterns tried in order against the upstream message when no
/// recognizable code is present. Most specific first: "User not found" must
/// win over the generic "not found".
const MESSAGE_PATTERNS: &[(&str, Category)] = &[
    ("Cannot follow yourself", Category::SelfFollow),
    ("Already following", Category::DuplicateFollow),
    ("User not found", Category::UserNotFound),
    ("not found", Category::NotFound),
];

fn category_for_code(code: &str) -> Option<Category> {
    match code {
        "SELF_FOLLOW" => Some(Category::SelfFollow),
        "DUPLICATE_FOLLOW" => Some(Category::DuplicateFollow),
        "USER_NOT_FOUND" => Some(Category::UserNotFound),
        "NOT_FOUND" => Some(Category::NotFound),
        _ => None,
    }
}

fn category_for_message(message: &str) -> Category {
    MESSAGE_PATTERNS
        .iter()
        .find(|(pattern, _)| message.contains(pattern))
        .map(|&(_, category)| category)
        .unwrap_or(Category::Service)
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        let category = match &err {
            UpstreamError::Rejected { message, code } => code
                .as_deref()
                .and_then(category_for_code)
                .unwrap_or_else(|| category_for_message(message)),
            UpstreamError::Transport(_) | UpstreamError::EmptyEnvelope => Category::Internal,
        };
        match category {
            Category::SelfFollow => AppError::SelfFollow(err),
            Category::DuplicateFollow => AppError::DuplicateFollow(err),
            Category::UserNotFound => AppError::UserNotFound(err),
            Category::NotFound => AppError::NotFound(err),
            Category::Service => AppError::FollowService(err),
            Category::Internal => AppError::Internal(err),
        }
    }
}

impl AppError {
    /// Stable machine-readable code surfaced in the GraphQL error
    /// extensions.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::SelfFollow(_) => "SELF_FOLLOW",
            AppError::DuplicateFollow(_) => "DUPLICATE_FOLLOW",
            AppError::UserNotFound(_) => "USER_NOT_FOUND",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::FollowService(_) => "FOLLOW_SERVICE_ERROR",
            AppError::Internal(_) | AppError::Config(_) | AppError::Io(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> GraphQLError {
        // Only the message and the code cross the boundary; the wrapped
        // cause stays on the source chain for logs.
        GraphQLError::new(self.to_string()).extend_with(|_err, e| e.set("code", self.code()))
    }
}

// Allow converting AppError to FieldResult (which is Result<T, GraphQLError>).
// The AppError -> GraphQLError conversion is carried out at the resolver call
// sites via `async_graphql::ResultExt::extend`, which routes through the
// `ErrorExtensions` impl above. A blanket `From<AppError> for GraphQLError`
// cannot be declared here: async-graphql already provides a blanket
// `impl<T: Display + Send + Sync + 'static> From<T> for Error`, and AppError
// (being `Display` via thiserror) is covered by it.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "session";

/// Landing page (post list)
pub const INDEX_PATH: &str = "/";

/// Where anonymous users are sent by the login guard
pub const LOGIN_PATH: &str = "/auth/login";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_USERNAME_REQUIRED: &str = "Username is required.";

pub const ERR_PASSWORD_REQUIRED: &str = "Password is required.";

pub const ERR_INCORRECT_USERNAME: &str = "Incorrect username.";

pub const ERR_INCORRECT_PASSWORD: &str = "Incorrect password.";

pub const ERR_TITLE_REQUIRED: &str = "Title is required.";

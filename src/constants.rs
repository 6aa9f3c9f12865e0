pub mod roles {

    pub const ADMIN: &str = "admin";

    pub const OPERATOR: &str = "operator";
}

pub mod session {

    /// Session key under which the authenticated context is stored.
    pub const AUTH_KEY: &str = "auth";
}

pub mod bootstrap {

    pub const ADMIN_USERNAME: &str = "admin";

    pub const ADMIN_FULL_NAME: &str = "Administrator";

    /// Seeded password for the bootstrap admin. Change it after first login.
    pub const ADMIN_PASSWORD: &str = "password";
}

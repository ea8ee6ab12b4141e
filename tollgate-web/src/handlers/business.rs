//! Role-protected sample endpoints; each answers with the role that guards it

use tollgate_security::roles;

pub async fn admin_endpoint() -> &'static str {
    roles::ADMIN
}

pub async fn reviewer_endpoint() -> &'static str {
    roles::REVIEWER
}

pub async fn user_endpoint() -> &'static str {
    roles::USER
}

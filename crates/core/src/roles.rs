//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint in `20260301000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_EDITOR: &str = "EDITOR";

/// Roles allowed to create and edit catalog and content entities.
pub const CONTENT_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Whether `role` may create or edit catalog and content entities.
pub fn can_edit_content(role: &str) -> bool {
    CONTENT_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_editor_can_edit() {
        assert!(can_edit_content(ROLE_ADMIN));
        assert!(can_edit_content(ROLE_EDITOR));
    }

    #[test]
    fn role_check_is_case_sensitive() {
        assert!(!can_edit_content("admin"));
        assert!(!can_edit_content(""));
    }
}

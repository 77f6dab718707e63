//! Session role bootstrap.

use hl_common::Role;

/// Resolve a stored or requested role tag.
///
/// Missing or unrecognized tags quietly fall back to `default`.
pub fn resolve_role(requested: Option<&str>, default: Role) -> Role {
    match requested {
        Some(tag) => tag.parse().unwrap_or_else(|_| {
            tracing::debug!(
                requested = tag,
                fallback = %default,
                "Unknown role tag, using default"
            );
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tag_is_used() {
        assert_eq!(resolve_role(Some("AD_MANAGER"), Role::DEFAULT), Role::AdManager);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_admin() {
        assert_eq!(resolve_role(Some("SUPERUSER"), Role::DEFAULT), Role::Admin);
    }

    #[test]
    fn test_case_variant_falls_back() {
        assert_eq!(resolve_role(Some("owner"), Role::DEFAULT), Role::Admin);
    }

    #[test]
    fn test_missing_tag_uses_default() {
        assert_eq!(resolve_role(None, Role::DEFAULT), Role::Admin);
        assert_eq!(resolve_role(None, Role::Support), Role::Support);
    }
}

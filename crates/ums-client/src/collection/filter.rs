use ums_model::User;

/// Users whose first name, last name or email contains `term`, ignoring case.
///
/// An empty term returns every user. Order is preserved.
pub fn search(users: &[User], term: &str) -> Vec<User> {
    if term.is_empty() {
        return users.to_vec();
    }

    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|user| user.matches_lowercase(&needle))
        .cloned()
        .collect()
}

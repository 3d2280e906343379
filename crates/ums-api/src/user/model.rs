use ums_model::{PER_PAGE, User, UserId, UserPage};

/// Seed users served by the listing endpoints, two pages of six
pub fn seed_users() -> Vec<User> {
    [
        (1, "george.bluth@reqres.in", "George", "Bluth"),
        (2, "janet.weaver@reqres.in", "Janet", "Weaver"),
        (3, "emma.wong@reqres.in", "Emma", "Wong"),
        (4, "eve.holt@reqres.in", "Eve", "Holt"),
        (5, "charles.morris@reqres.in", "Charles", "Morris"),
        (6, "tracey.ramos@reqres.in", "Tracey", "Ramos"),
        (7, "michael.lawson@reqres.in", "Michael", "Lawson"),
        (8, "lindsay.ferguson@reqres.in", "Lindsay", "Ferguson"),
        (9, "tobias.funke@reqres.in", "Tobias", "Funke"),
        (10, "byron.fields@reqres.in", "Byron", "Fields"),
        (11, "george.edwards@reqres.in", "George", "Edwards"),
        (12, "rachel.howell@reqres.in", "Rachel", "Howell"),
    ]
    .into_iter()
    .map(|(id, email, first_name, last_name)| User {
        id,
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
    })
    .collect()
}

/// Immutable, paginated view over the seed users.
///
/// The mock never persists writes, so this never changes after startup.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
    per_page: u32,
}

impl UserDirectory {
    pub fn new(users: Vec<User>, per_page: u32) -> Self {
        Self {
            users,
            per_page: per_page.max(1),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_users(), PER_PAGE)
    }

    pub fn total(&self) -> u32 {
        u32::try_from(self.users.len()).unwrap_or(u32::MAX)
    }

    pub fn total_pages(&self) -> u32 {
        self.total().div_ceil(self.per_page)
    }

    /// Slice out page `page` (1-based). Pages past the end have no data.
    pub fn page(&self, page: u32) -> UserPage {
        let page = page.max(1);
        let start = (page as usize - 1).saturating_mul(self.per_page as usize);
        let data = self
            .users
            .iter()
            .skip(start)
            .take(self.per_page as usize)
            .cloned()
            .collect();

        UserPage {
            page,
            per_page: self.per_page,
            total: self.total(),
            total_pages: self.total_pages(),
            data,
        }
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

//! Pre-built Test Fixtures
//!
//! Consistent, predictable test data for users, reports and claims.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use core_kernel::UserId;
use domain_lostfound::{
    Category, Credentials, InMemoryStore, ItemType, LostFoundService, NewClaim, NewItem, Role,
    User,
};

/// Fixed reference instant (Mar 4, 2024 09:30 UTC)
pub static REFERENCE_TIME: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).single().unwrap_or_default());

/// Fixture for portal users
pub struct UserFixtures;

impl UserFixtures {
    /// Student with roll number `22CS041`
    pub fn student() -> User {
        User {
            id: UserId::new(),
            identifier: "22CS041".to_string(),
            email: "asha@campus.edu".to_string(),
            role: Role::Student,
        }
    }

    /// A second student, for claims against someone else's report
    pub fn other_student() -> User {
        User {
            id: UserId::new(),
            identifier: "22ME113".to_string(),
            email: "ravi@campus.edu".to_string(),
            role: Role::Student,
        }
    }

    /// Faculty member with staff code `FAC-007`
    pub fn faculty() -> User {
        User {
            id: UserId::new(),
            identifier: "FAC-007".to_string(),
            email: "prof.rao@campus.edu".to_string(),
            role: Role::Faculty,
        }
    }

    /// Login attempt with the default password for the user's role
    pub fn credentials(user: &User) -> Credentials {
        let password = match user.role {
            Role::Student => "Student@123",
            Role::Faculty => "Faculty@123",
        };
        Credentials {
            identifier: user.identifier.clone(),
            password: password.to_string(),
            role: user.role,
        }
    }
}

/// Fixture for report and claim submissions
pub struct ReportFixtures;

impl ReportFixtures {
    /// A lost-keys report
    pub fn dorm_keys() -> NewItem {
        NewItem {
            title: "Dorm Keys".to_string(),
            description: "Two keys on a red lanyard".to_string(),
            category: Category::Keys,
            item_type: ItemType::Lost,
            location: Some("Hostel C".to_string()),
        }
    }

    /// A found-headphones report
    pub fn headphones() -> NewItem {
        NewItem {
            title: "Sony WH-1000XM4".to_string(),
            description: "Black over-ear headphones in a case".to_string(),
            category: Category::Electronics,
            item_type: ItemType::Found,
            location: Some("Library Block A".to_string()),
        }
    }

    /// A found-calculator report
    pub fn calculator() -> NewItem {
        NewItem {
            title: "Casio Calculator".to_string(),
            description: "fx-991EX, initials scratched on the back".to_string(),
            category: Category::Stationery,
            item_type: ItemType::Found,
            location: Some("Lab 3".to_string()),
        }
    }

    /// A claim with proof and an opening message
    pub fn claim_with_message() -> NewClaim {
        NewClaim {
            details: Some("Initials A.K. on the back".to_string()),
            message: Some("I left it after the Monday lab".to_string()),
        }
    }
}

/// A service over a fresh in-memory store seeded with the fixture users
pub struct MemoryHarness {
    pub store: Arc<InMemoryStore>,
    pub service: LostFoundService,
    pub student: User,
    pub other_student: User,
    pub faculty: User,
}

impl MemoryHarness {
    pub async fn new() -> Self {
        let student = UserFixtures::student();
        let other_student = UserFixtures::other_student();
        let faculty = UserFixtures::faculty();

        let store = Arc::new(
            InMemoryStore::with_users(vec![student.clone(), other_student.clone(), faculty.clone()])
                .await,
        );
        let service = LostFoundService::new(store.clone());

        Self {
            store,
            service,
            student,
            other_student,
            faculty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_harness_users_can_log_in() {
        let harness = MemoryHarness::new().await;
        let user = harness
            .service
            .login(&UserFixtures::credentials(&harness.faculty))
            .await
            .unwrap();
        assert_eq!(user.id, harness.faculty.id);
    }
}

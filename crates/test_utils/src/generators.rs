//! Property-Based Test Generators
//!
//! proptest strategies for lost & found values, plus `fake` helpers for
//! realistic one-off reports.

use chrono::{DateTime, Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Words};
use fake::Fake;
use proptest::prelude::*;

use core_kernel::UserId;
use domain_lostfound::{Category, Item, ItemStatus, ItemType, NewItem, Role, User};

use crate::builders::TestItemBuilder;
use crate::fixtures::REFERENCE_TIME;

pub fn item_type_strategy() -> impl Strategy<Value = ItemType> {
    prop_oneof![Just(ItemType::Lost), Just(ItemType::Found)]
}

pub fn item_status_strategy() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![Just(ItemStatus::Open), Just(ItemStatus::Claimed)]
}

pub fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// Non-blank titles of one to four words
pub fn title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,12}( [A-Za-z0-9]{1,12}){0,3}"
}

/// Optional creation time within the last thirty days of the reference instant
pub fn created_at_strategy() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    prop::option::weighted(0.9, 0i64..43_200).prop_map(|minutes| {
        minutes.map(|m| *REFERENCE_TIME - Duration::minutes(m))
    })
}

/// Stored items with any type, category, status and age
pub fn item_strategy() -> impl Strategy<Value = Item> {
    (
        title_strategy(),
        category_strategy(),
        item_type_strategy(),
        item_status_strategy(),
        created_at_strategy(),
    )
        .prop_map(|(title, category, item_type, status, created_at)| {
            let builder = TestItemBuilder::new()
                .with_title(title)
                .with_category(category);
            let builder = match status {
                ItemStatus::Claimed => builder.claimed_by(UserId::new()),
                ItemStatus::Open => builder,
            };
            let mut item = builder.build();
            item.item_type = item_type;
            item.created_at = created_at;
            item
        })
}

/// Report submission with lorem-ipsum text
pub fn fake_new_item() -> NewItem {
    let words: Vec<String> = Words(1..4).fake();
    NewItem {
        title: words.join(" "),
        description: Sentence(4..10).fake(),
        category: Category::Other,
        item_type: ItemType::Found,
        location: Some(Words(1..3).fake::<Vec<String>>().join(" ")),
    }
}

/// Student with a random roll number and e-mail
pub fn fake_student() -> User {
    User {
        id: UserId::new(),
        identifier: format!("{:02}CS{:03}", (18..26).fake::<u8>(), (1..200).fake::<u16>()),
        email: SafeEmail().fake(),
        role: Role::Student,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_generated_titles_are_not_blank(title in title_strategy()) {
            prop_assert!(!title.trim().is_empty());
        }

        #[test]
        fn test_generated_items_are_dated_before_reference(item in item_strategy()) {
            if let Some(created_at) = item.created_at {
                prop_assert!(created_at <= *REFERENCE_TIME);
            }
        }
    }

    #[test]
    fn test_fake_student_answers_to_email() {
        let student = fake_student();
        assert!(student.answers_to(&student.email));
    }
}

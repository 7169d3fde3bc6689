// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory persistence for users, rentals and messages.
//!
//! This is the user-lookup and credential-store collaborator consumed by
//! the auth layer. The auth core only ever reads user records; writes
//! happen through the registration flow.

use std::collections::HashMap;

use chrono::Utc;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    CreateMessageRequest, CreateRentalRequest, Message, Rental, UpdateRentalRequest, User,
};

/// Canonical email form used as the unique comparison key.
///
/// NFKC first, so visually identical addresses collapse to one key, then
/// a case fold. Every email entering the store or a lookup goes through
/// this one function.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().nfkc().collect::<String>().to_lowercase()
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<String, User>,
    users_by_email: HashMap<String, String>,
    rentals: HashMap<String, Rental>,
    messages: Vec<Message>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Create a new user account.
    ///
    /// The email is normalized before the uniqueness check, so two
    /// addresses differing only in case map to the same account.
    pub fn create_user(
        &mut self,
        email: &str,
        name: &str,
        password_hash: String,
    ) -> Result<User, ApiError> {
        let email = normalize_email(email);
        if self.users_by_email.contains_key(&email) {
            return Err(ApiError::bad_request("Email already in use"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            name: name.to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.users_by_email.insert(email, user.id.clone());
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Look up a user by email (case-insensitive).
    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let key = normalize_email(email);
        self.users_by_email
            .get(&key)
            .and_then(|id| self.users.get(id))
            .cloned()
    }

    pub fn get_user(&self, id: &str) -> Option<User> {
        self.users.get(id).cloned()
    }

    // -------------------------------------------------------------------------
    // Rentals
    // -------------------------------------------------------------------------

    /// List all rental listings, oldest first.
    pub fn list_rentals(&self) -> Vec<Rental> {
        let mut rentals: Vec<Rental> = self.rentals.values().cloned().collect();
        rentals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        rentals
    }

    pub fn get_rental(&self, id: &str) -> Option<Rental> {
        self.rentals.get(id).cloned()
    }

    pub fn create_rental(&mut self, owner_id: &str, request: CreateRentalRequest) -> Rental {
        let now = Utc::now();
        let rental = Rental {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            surface: request.surface,
            price: request.price,
            picture: request.picture,
            description: request.description,
            owner_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.rentals.insert(rental.id.clone(), rental.clone());
        rental
    }

    /// Apply a partial update to a rental. Absent fields keep their value.
    pub fn update_rental(
        &mut self,
        id: &str,
        request: UpdateRentalRequest,
    ) -> Result<Rental, ApiError> {
        let rental = self
            .rentals
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("Rental not found"))?;

        if let Some(name) = request.name {
            rental.name = name;
        }
        if let Some(surface) = request.surface {
            rental.surface = surface;
        }
        if let Some(price) = request.price {
            rental.price = price;
        }
        if let Some(picture) = request.picture {
            rental.picture = Some(picture);
        }
        if let Some(description) = request.description {
            rental.description = description;
        }
        rental.updated_at = Utc::now();

        Ok(rental.clone())
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    /// Record a message about a rental. The rental must exist.
    pub fn create_message(
        &mut self,
        user_id: &str,
        request: CreateMessageRequest,
    ) -> Result<Message, ApiError> {
        if !self.rentals.contains_key(&request.rental_id) {
            return Err(ApiError::bad_request("Rental not found"));
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            rental_id: request.rental_id,
            user_id: user_id.to_string(),
            message: request.message,
            created_at: Utc::now(),
        };
        self.messages.push(message.clone());
        Ok(message)
    }

    /// Messages recorded for a rental, in insertion order.
    pub fn messages_for_rental(&self, rental_id: &str) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.rental_id == rental_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rental_request() -> CreateRentalRequest {
        CreateRentalRequest {
            name: "maison 1".into(),
            surface: 170.0,
            price: 540_000.0,
            picture: None,
            description: "stone house".into(),
        }
    }

    #[test]
    fn normalize_email_folds_case_and_whitespace() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }

    #[test]
    fn create_user_rejects_duplicate_email_case_insensitively() {
        let mut store = InMemoryStore::new();
        store
            .create_user("a@x.com", "A", "hash".into())
            .expect("first registration succeeds");

        let result = store.create_user("A@X.COM", "Other", "hash2".into());
        assert!(result.is_err());
    }

    #[test]
    fn find_user_by_email_is_case_insensitive() {
        let mut store = InMemoryStore::new();
        let created = store
            .create_user("A@X.com", "A", "hash".into())
            .expect("registration succeeds");

        let found = store.find_user_by_email("a@x.COM").expect("user found");
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "a@x.com");
    }

    #[test]
    fn update_rental_applies_partial_changes() {
        let mut store = InMemoryStore::new();
        let rental = store.create_rental("owner", sample_rental_request());

        let updated = store
            .update_rental(
                &rental.id,
                UpdateRentalRequest {
                    price: Some(499_000.0),
                    ..Default::default()
                },
            )
            .expect("update succeeds");

        assert_eq!(updated.price, 499_000.0);
        assert_eq!(updated.name, "maison 1");
        assert_eq!(updated.owner_id, "owner");
    }

    #[test]
    fn update_rental_unknown_id_is_not_found() {
        let mut store = InMemoryStore::new();
        let result = store.update_rental("missing", UpdateRentalRequest::default());
        assert!(result.is_err());
    }

    #[test]
    fn create_message_requires_existing_rental() {
        let mut store = InMemoryStore::new();
        let result = store.create_message(
            "u1",
            CreateMessageRequest {
                rental_id: "missing".into(),
                message: "hello".into(),
            },
        );
        assert!(result.is_err());

        let rental = store.create_rental("owner", sample_rental_request());
        let message = store
            .create_message(
                "u1",
                CreateMessageRequest {
                    rental_id: rental.id.clone(),
                    message: "hello".into(),
                },
            )
            .expect("message recorded");

        assert_eq!(store.messages_for_rental(&rental.id), vec![message]);
    }
}

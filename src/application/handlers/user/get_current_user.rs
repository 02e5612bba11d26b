//! GetCurrentUserHandler - Query handler for the caller's account summary.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::UserError;
use crate::ports::{ReadingReader, UserRepository};

/// Account details plus book totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub total_books: u64,
    pub finished_books: u64,
    pub created_at: Timestamp,
}

pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
    reader: Arc<dyn ReadingReader>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, reader: Arc<dyn ReadingReader>) -> Self {
        Self { users, reader }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<CurrentUserView, UserError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)?;
        let (total_books, finished_books) = self.reader.count_book_sessions(user_id).await?;

        Ok(CurrentUserView {
            id: user.id,
            name: user.name,
            email: user.email,
            total_books,
            finished_books,
            created_at: user.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::services::BookSessionService;
    use crate::domain::reading::{BookSessionChanges, NewBookSession};
    use crate::domain::user::{PasswordHash, User};

    #[tokio::test]
    async fn counts_total_and_finished_books() {
        let store = Arc::new(InMemoryStore::new());
        let user = User::register("Ada", "ada@example.com", PasswordHash::new("h"), Timestamp::now())
            .unwrap();
        UserRepository::save(store.as_ref(), &user).await.unwrap();

        let books = BookSessionService::new(store.clone(), store.clone());
        let fields = NewBookSession {
            title: "Emma".to_string(),
            page_number: 400,
            ..Default::default()
        };
        books.create(&user.id, fields.clone()).await.unwrap();
        let second = books.create(&user.id, fields).await.unwrap();
        books
            .update(
                &second,
                BookSessionChanges {
                    is_finished: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let view = GetCurrentUserHandler::new(store.clone(), store)
            .handle(&user.id)
            .await
            .unwrap();

        assert_eq!(view.email, "ada@example.com");
        assert_eq!((view.total_books, view.finished_books), (2, 1));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let result = GetCurrentUserHandler::new(store.clone(), store)
            .handle(&UserId::new())
            .await;

        assert_eq!(result, Err(UserError::UserNotFound));
    }
}

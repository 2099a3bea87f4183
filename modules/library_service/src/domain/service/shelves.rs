use super::{internal, is_unique_violation, Service};
use crate::contract::{LibraryError, NewShelf, Shelf, ShelfPatch, ShelfWithBooks};
use crate::domain::validation;
use tracing::info;

impl Service {
    // ===== Shelf Operations =====

    pub async fn create_shelf(&self, new: NewShelf) -> Result<ShelfWithBooks, LibraryError> {
        validation::validate_new_shelf(&new)?;
        self.ensure_shelf_name_free(&new.name).await?;

        let shelf = self
            .shelves
            .create(&new)
            .await
            .map_err(|err| name_conflict_or_internal(&new.name, err))?;
        info!(shelf_id = shelf.id, name = %shelf.name, "Created shelf");
        Ok(ShelfWithBooks {
            shelf,
            books: Vec::new(),
        })
    }

    pub async fn get_shelf(&self, id: i64) -> Result<ShelfWithBooks, LibraryError> {
        let shelf = self.find_shelf(id).await?;
        self.with_books(shelf).await
    }

    /// Every shelf with its books, ordered by name
    pub async fn list_shelves(&self) -> Result<Vec<ShelfWithBooks>, LibraryError> {
        let shelves = self.shelves.list_all().await.map_err(internal)?;
        let mut result = Vec::with_capacity(shelves.len());
        for shelf in shelves {
            result.push(self.with_books(shelf).await?);
        }
        Ok(result)
    }

    pub async fn update_shelf(
        &self,
        id: i64,
        patch: ShelfPatch,
    ) -> Result<ShelfWithBooks, LibraryError> {
        validation::validate_shelf_patch(&patch)?;
        let mut shelf = self.find_shelf(id).await?;

        if let Some(name) = patch.name {
            if name != shelf.name {
                self.ensure_shelf_name_free(&name).await?;
                shelf.name = name;
            }
        }
        if let Some(description) = patch.description {
            shelf.description = Some(description);
        }

        let shelf = self
            .shelves
            .update(&shelf)
            .await
            .map_err(|err| name_conflict_or_internal(&shelf.name, err))?;
        info!(shelf_id = shelf.id, name = %shelf.name, "Updated shelf");
        self.with_books(shelf).await
    }

    /// Delete a shelf; its books stay in the library
    pub async fn delete_shelf(&self, id: i64) -> Result<(), LibraryError> {
        self.find_shelf(id).await?;
        self.shelves.delete(id).await.map_err(internal)?;
        info!(shelf_id = id, "Deleted shelf");
        Ok(())
    }

    /// Put a book on a shelf; a book already there is left alone
    pub async fn add_book_to_shelf(
        &self,
        shelf_id: i64,
        book_id: i64,
    ) -> Result<ShelfWithBooks, LibraryError> {
        let shelf = self.find_shelf(shelf_id).await?;
        self.get_book(book_id).await?;

        if !self
            .shelves
            .contains_book(shelf_id, book_id)
            .await
            .map_err(internal)?
        {
            match self.shelves.add_book(shelf_id, book_id).await {
                Ok(()) => info!(shelf_id, book_id, "Added book to shelf"),
                // Placed there concurrently
                Err(err) if is_unique_violation(&err) => {}
                Err(err) => return Err(internal(err)),
            }
        }
        self.with_books(shelf).await
    }

    pub async fn remove_book_from_shelf(
        &self,
        shelf_id: i64,
        book_id: i64,
    ) -> Result<ShelfWithBooks, LibraryError> {
        let shelf = self.find_shelf(shelf_id).await?;
        self.get_book(book_id).await?;

        if self
            .shelves
            .contains_book(shelf_id, book_id)
            .await
            .map_err(internal)?
        {
            self.shelves
                .remove_book(shelf_id, book_id)
                .await
                .map_err(internal)?;
            info!(shelf_id, book_id, "Removed book from shelf");
        }
        self.with_books(shelf).await
    }

    async fn find_shelf(&self, id: i64) -> Result<Shelf, LibraryError> {
        self.shelves
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| LibraryError::not_found("shelf", id))
    }

    async fn with_books(&self, shelf: Shelf) -> Result<ShelfWithBooks, LibraryError> {
        let books = self
            .shelves
            .books_on_shelf(shelf.id)
            .await
            .map_err(internal)?;
        Ok(ShelfWithBooks { shelf, books })
    }

    async fn ensure_shelf_name_free(&self, name: &str) -> Result<(), LibraryError> {
        if self.shelves.exists_by_name(name).await.map_err(internal)? {
            return Err(name_taken(name));
        }
        Ok(())
    }
}

fn name_taken(name: &str) -> LibraryError {
    LibraryError::conflict(format!("Shelf with name '{}' already exists", name))
}

fn name_conflict_or_internal(name: &str, err: anyhow::Error) -> LibraryError {
    if is_unique_violation(&err) {
        name_taken(name)
    } else {
        internal(err)
    }
}

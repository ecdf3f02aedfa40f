//! Review repository.
//!
//! The whole list is stored as one JSON array under a single key. Records
//! that do not decode are logged and skipped, and a value that is not an
//! array reads as an empty list. Before such a value is rewritten, the raw
//! text is copied to [`UNREADABLE_REVIEWS_KEY`].

use tokio::sync::Mutex;
use your_slice_core::review::{DecodedReviews, REVIEWS_KEY, Review, ReviewBook};

use super::{KeyValueStore, RepositoryError};

/// Key holding the last stored value that could not be fully decoded.
pub const UNREADABLE_REVIEWS_KEY: &str = "reviews_unreadable";

/// The stored list, plus the raw value when decoding lost records.
struct Loaded {
    book: ReviewBook,
    lossy_raw: Option<String>,
}

/// Repository for customer reviews.
#[derive(Debug)]
pub struct ReviewRepository {
    store: KeyValueStore,
    write_lock: Mutex<()>,
}

impl ReviewRepository {
    #[must_use]
    pub fn new(store: KeyValueStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Whether reviews outlive the process.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.store.is_persistent()
    }

    /// Load all reviews in submission order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store cannot be read.
    pub async fn list(&self) -> Result<ReviewBook, RepositoryError> {
        Ok(self.load().await?.book)
    }

    async fn load(&self) -> Result<Loaded, RepositoryError> {
        let Some(raw) = self.store.get(REVIEWS_KEY).await? else {
            return Ok(Loaded {
                book: ReviewBook::new(),
                lossy_raw: None,
            });
        };

        match ReviewBook::from_json(&raw) {
            Ok(DecodedReviews { book, skipped: 0 }) => Ok(Loaded {
                book,
                lossy_raw: None,
            }),
            Ok(DecodedReviews { book, skipped }) => {
                tracing::warn!(skipped, kept = book.len(), "Skipping unreadable stored reviews");
                Ok(Loaded {
                    book,
                    lossy_raw: Some(raw),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored reviews are unreadable, starting from an empty list");
                Ok(Loaded {
                    book: ReviewBook::new(),
                    lossy_raw: Some(raw),
                })
            }
        }
    }

    /// Append a review and return the updated list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store cannot be read or written.
    pub async fn add(&self, review: Review) -> Result<ReviewBook, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let Loaded { mut book, lossy_raw } = self.load().await?;
        book.push(review);
        self.save(&book, lossy_raw).await?;
        Ok(book)
    }

    /// Remove the first review equal to `review` and return the updated list.
    ///
    /// Nothing is written when no review matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store cannot be read or written.
    pub async fn remove(&self, review: &Review) -> Result<(ReviewBook, bool), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let Loaded { mut book, lossy_raw } = self.load().await?;
        let removed = book.remove(review);
        if removed {
            self.save(&book, lossy_raw).await?;
        }
        Ok((book, removed))
    }

    async fn save(&self, book: &ReviewBook, lossy_raw: Option<String>) -> Result<(), RepositoryError> {
        if let Some(raw) = lossy_raw {
            tracing::warn!(key = UNREADABLE_REVIEWS_KEY, "Backing up unreadable reviews before rewriting");
            self.store.set(UNREADABLE_REVIEWS_KEY, raw).await?;
        }
        self.store.set(REVIEWS_KEY, book.to_json()?).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn review(name: &str, stars: &str, text: &str) -> Review {
        Review::from_form(name, stars, text).unwrap()
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let repo = ReviewRepository::new(KeyValueStore::memory());
        assert!(repo.list().await.unwrap().is_empty());

        repo.add(review("Aino", "5", "Best slice in town")).await.unwrap();
        repo.add(review("Ville", "3", "Okay")).await.unwrap();

        let book = repo.list().await.unwrap();
        let names: Vec<_> = book.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Aino", "Ville"]);
    }

    #[tokio::test]
    async fn test_remove_first_exact_match() {
        let repo = ReviewRepository::new(KeyValueStore::memory());
        let dup = review("Aino", "5", "Great");
        repo.add(dup.clone()).await.unwrap();
        repo.add(dup.clone()).await.unwrap();

        let (book, removed) = repo.remove(&dup).await.unwrap();
        assert!(removed);
        assert_eq!(book.len(), 1);

        let (_, removed) = repo.remove(&review("Aino", "4", "Great")).await.unwrap();
        assert!(!removed);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_value_reads_as_empty() {
        let store = KeyValueStore::memory();
        store.set(REVIEWS_KEY, "{oops".to_string()).await.unwrap();
        let repo = ReviewRepository::new(store);

        assert!(repo.list().await.unwrap().is_empty());
        let book = repo.add(review("Aino", "4", "Recovered")).await.unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(
            repo.store.get(UNREADABLE_REVIEWS_KEY).await.unwrap().as_deref(),
            Some("{oops")
        );
    }

    #[tokio::test]
    async fn test_text_ratings_are_read_and_kept() {
        let store = KeyValueStore::memory();
        let seeded = r#"[{"name":"Aino","rating":"5","text":"Great"},{"name":"Ville","rating":"4","text":"Good"}]"#;
        store.set(REVIEWS_KEY, seeded.to_string()).await.unwrap();
        let repo = ReviewRepository::new(store);

        assert_eq!(repo.list().await.unwrap().len(), 2);
        let book = repo.add(review("Laura", "3", "Fine")).await.unwrap();
        let names: Vec<_> = book.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Aino", "Ville", "Laura"]);
        assert_eq!(repo.list().await.unwrap().len(), 3);
        assert!(repo.store.get(UNREADABLE_REVIEWS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_one_bad_record_keeps_the_rest() {
        let store = KeyValueStore::memory();
        let seeded = r#"[{"name":"Aino","rating":"5","text":"Great"},{"name":"Ville","rating":"11","text":"Odd"}]"#;
        store.set(REVIEWS_KEY, seeded.to_string()).await.unwrap();
        let repo = ReviewRepository::new(store);

        assert_eq!(repo.list().await.unwrap().len(), 1);
        let book = repo.add(review("Laura", "3", "Fine")).await.unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(
            repo.store.get(UNREADABLE_REVIEWS_KEY).await.unwrap().as_deref(),
            Some(seeded)
        );
    }

    #[tokio::test]
    async fn test_reviews_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");

        ReviewRepository::new(KeyValueStore::file(&path))
            .add(review("Aino", "5", "Kept"))
            .await
            .unwrap();

        let reopened = ReviewRepository::new(KeyValueStore::file(&path));
        assert_eq!(reopened.list().await.unwrap().len(), 1);
    }
}

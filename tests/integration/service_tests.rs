//! Service layer tests against an in-memory database

mod common;

use chrono::{Duration, Utc};

use common::*;
use stacks_server::models::{
    author::AuthorPayload,
    book::{CreateBook, UpdateBook},
    genre::GenrePayload,
    loan::CreateLoan,
    member::MemberPayload,
    Pagination,
};

fn loan(book_id: i64, member_id: i64) -> CreateLoan {
    CreateLoan { book_id, member_id }
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_duplicate_author_ignores_case() {
    let state = test_state().await;
    author(&state, "Frank Herbert", 1920).await;

    let result = state
        .services
        .authors
        .create(&AuthorPayload {
            name: "frank HERBERT".to_string(),
            birth_year: Some(1920),
        })
        .await;
    assert_eq!(
        validation_message(result),
        "An author with the same name and birth year already exists."
    );

    // Same name, different year is another person
    let other = state
        .services
        .authors
        .create(&AuthorPayload {
            name: "Frank Herbert".to_string(),
            birth_year: Some(1921),
        })
        .await;
    assert!(other.is_ok());
}

#[tokio::test]
async fn test_author_field_checks() {
    let state = test_state().await;
    let authors = &state.services.authors;

    let missing_year = authors
        .create(&AuthorPayload {
            name: "Andy Weir".to_string(),
            birth_year: None,
        })
        .await;
    assert_eq!(validation_message(missing_year), "Birth year must be a number.");

    let short_year = authors
        .create(&AuthorPayload {
            name: "Andy Weir".to_string(),
            birth_year: Some(972),
        })
        .await;
    assert_eq!(validation_message(short_year), "Year must be a 4 digit number.");

    let blank = authors
        .create(&AuthorPayload {
            name: "   ".to_string(),
            birth_year: Some(1972),
        })
        .await;
    assert_eq!(validation_message(blank), "Name cannot be empty or just spaces.");
}

#[tokio::test]
async fn test_update_author_excludes_itself() {
    let state = test_state().await;
    let herbert = author(&state, "Frank Herbert", 1920).await;
    author(&state, "Isaac Asimov", 1920).await;

    let renamed = state
        .services
        .authors
        .update(
            herbert.id,
            &AuthorPayload {
                name: "FRANK HERBERT".to_string(),
                birth_year: Some(1920),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "FRANK HERBERT");

    let clash = state
        .services
        .authors
        .update(
            herbert.id,
            &AuthorPayload {
                name: "isaac asimov".to_string(),
                birth_year: Some(1920),
            },
        )
        .await;
    assert!(validation_message(clash).contains("already exists"));

    let missing = state
        .services
        .authors
        .update(
            9999,
            &AuthorPayload {
                name: "Nobody".to_string(),
                birth_year: Some(1950),
            },
        )
        .await;
    assert!(is_not_found(&missing));
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let state = test_state().await;
    let (author, _, book) = catalogue(&state).await;

    let result = state.services.authors.delete(author.id).await;
    assert_eq!(validation_message(result), "Cannot delete author with existing books");

    state.services.books.delete(book.id).await.unwrap();
    let deleted = state.services.authors.delete(author.id).await.unwrap();
    assert_eq!(deleted.name, "Frank Herbert");
    assert!(is_not_found(&state.services.authors.get(author.id).await));
}

#[tokio::test]
async fn test_authors_pagination() {
    let state = test_state().await;
    for i in 1..=12 {
        author(&state, &format!("Author {:02}", i), 1900 + i).await;
    }

    let page = state.services.authors.list(Pagination::new(2, 5)).await.unwrap();
    let names: Vec<&str> = page.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Author 06", "Author 07", "Author 08", "Author 09", "Author 10"]
    );
    assert_eq!(state.services.authors.count().await.unwrap(), 12);

    let last = state.services.authors.list(Pagination::new(3, 5)).await.unwrap();
    assert_eq!(last.len(), 2);
}

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_duplicate_genre_ignores_case() {
    let state = test_state().await;
    let scifi = genre(&state, "Sci-Fi").await;

    let result = state
        .services
        .genres
        .create(&GenrePayload {
            name: "SCI-FI".to_string(),
        })
        .await;
    assert_eq!(validation_message(result), "Genre with this name already exists.");

    // Renaming to its own name in another case is fine
    let renamed = state
        .services
        .genres
        .update(
            scifi.id,
            &GenrePayload {
                name: "sci-fi".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "sci-fi");
}

#[tokio::test]
async fn test_genre_with_books_cannot_be_deleted() {
    let state = test_state().await;
    let (_, genre, book) = catalogue(&state).await;

    let result = state.services.genres.delete(genre.id).await;
    assert_eq!(validation_message(result), "Cannot delete genre with existing books");

    state.services.books.delete(book.id).await.unwrap();
    assert!(state.services.genres.delete(genre.id).await.is_ok());
    assert!(is_not_found(&state.services.genres.delete(genre.id).await));
}

#[tokio::test]
async fn test_store_rejects_duplicate_genre() {
    let state = test_state().await;
    state.repository.genres.create("Horror").await.unwrap();

    let err = state.repository.genres.create("HORROR").await.unwrap_err();
    assert!(err.is_unique_violation());
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_book_isbn_must_have_13_digits() {
    let state = test_state().await;
    let author = author(&state, "Andy Weir", 1972).await;
    let genre = genre(&state, "Sci-Fi").await;

    let short = state
        .services
        .books
        .create(&CreateBook {
            title: "The Martian".to_string(),
            isbn: "123456789012".to_string(),
            author_id: author.id,
            genre_id: genre.id,
        })
        .await;
    assert_eq!(validation_message(short), "ISBN must be exactly 13 digits.");

    let created = book(&state, "The Martian", "1234567890123", author.id, genre.id).await;
    assert_eq!(created.isbn, "1234567890123");
    assert_eq!(created.author.as_deref(), Some("Andy Weir"));
    assert_eq!(created.genre.as_deref(), Some("Sci-Fi"));
    assert!(!created.is_borrowed);
}

#[tokio::test]
async fn test_book_references_and_duplicates() {
    let state = test_state().await;
    let (author, genre, _) = catalogue(&state).await;

    let payload = |isbn: &str, author_id: i64, genre_id: i64, title: &str| CreateBook {
        title: title.to_string(),
        isbn: isbn.to_string(),
        author_id,
        genre_id,
    };

    let duplicate = state
        .services
        .books
        .create(&payload("9780441172719", author.id, genre.id, "Dune again"))
        .await;
    assert_eq!(validation_message(duplicate), "Book already exists.");

    let bad_author = state
        .services
        .books
        .create(&payload("9780441013593", 999, genre.id, "Dune Messiah"))
        .await;
    assert_eq!(validation_message(bad_author), "Please select a valid author.");

    let bad_genre = state
        .services
        .books
        .create(&payload("9780441013593", author.id, 999, "Dune Messiah"))
        .await;
    assert_eq!(validation_message(bad_genre), "Please select a valid genre.");

    let blank_title = state
        .services
        .books
        .create(&payload("9780441013593", author.id, genre.id, "  "))
        .await;
    assert_eq!(
        validation_message(blank_title),
        "Title cannot be empty or just spaces."
    );

    assert_eq!(state.services.books.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_partial_update() {
    let state = test_state().await;
    let (author, _, book) = catalogue(&state).await;
    let fantasy = genre(&state, "Fantasy").await;

    let retitled = state
        .services
        .books
        .update(
            book.id,
            &UpdateBook {
                title: Some("Dune (50th Anniversary)".to_string()),
                ..UpdateBook::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(retitled.title, "Dune (50th Anniversary)");
    assert_eq!(retitled.isbn, book.isbn);
    assert_eq!(retitled.author_id, Some(author.id));

    let regenred = state
        .services
        .books
        .update(
            book.id,
            &UpdateBook {
                genre_id: Some(fantasy.id),
                ..UpdateBook::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(regenred.genre.as_deref(), Some("Fantasy"));
    // the old genre link is gone
    assert_eq!(state.services.books.count(Some("Sci-Fi")).await.unwrap(), 0);

    let bad_isbn = state
        .services
        .books
        .update(
            book.id,
            &UpdateBook {
                isbn: Some("97804411".to_string()),
                ..UpdateBook::default()
            },
        )
        .await;
    assert!(bad_isbn.is_err());

    // Keeping its own ISBN is not a duplicate
    let same_isbn = state
        .services
        .books
        .update(
            book.id,
            &UpdateBook {
                isbn: Some(book.isbn.clone()),
                ..UpdateBook::default()
            },
        )
        .await;
    assert!(same_isbn.is_ok());

    let missing = state
        .services
        .books
        .update(4242, &UpdateBook::default())
        .await;
    assert!(is_not_found(&missing));
}

#[tokio::test]
async fn test_books_filtered_by_genre() {
    let state = test_state().await;
    let (author, scifi, _) = catalogue(&state).await;
    let classic = genre(&state, "Classic").await;
    book(&state, "Children of Dune", "9780441104024", author.id, scifi.id).await;
    book(&state, "The Eyes of Heisenberg", "9780425037164", author.id, classic.id).await;

    let books = &state.services.books;
    let scifi_books = books
        .list(Pagination::new(1, 10), Some("Sci-Fi"))
        .await
        .unwrap();
    let titles: Vec<&str> = scifi_books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Children of Dune", "Dune"]);
    assert_eq!(books.count(Some("Sci-Fi")).await.unwrap(), 2);
    assert_eq!(books.count(Some("Classic")).await.unwrap(), 1);
    assert_eq!(books.count(Some("Horror")).await.unwrap(), 0);
    assert_eq!(books.count(None).await.unwrap(), 3);
}

#[tokio::test]
async fn test_book_on_loan_cannot_be_deleted() {
    let state = test_state().await;
    let (_, _, book) = catalogue(&state).await;
    let member = member(&state, "Alex Morgan", "alex@example.com").await;

    let active = state.services.loans.borrow(&loan(book.id, member.id)).await.unwrap();
    assert!(state.services.books.get(book.id).await.unwrap().is_borrowed);

    let result = state.services.books.delete(book.id).await;
    assert_eq!(validation_message(result), "Cannot delete book with active loans");

    state.services.loans.return_loan(active.id).await.unwrap();
    assert!(!state.services.books.get(book.id).await.unwrap().is_borrowed);
    assert!(state.services.books.delete(book.id).await.is_ok());

    // the returned loan went with the book
    assert!(is_not_found(&state.services.loans.get(active.id).await));
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_member_email_checks() {
    let state = test_state().await;
    let alex = member(&state, "Alex Morgan", "alex@example.com").await;
    let priya = member(&state, "Priya Patel", "priya@example.com").await;

    let taken = state
        .services
        .members
        .create(&MemberPayload {
            name: "Another Alex".to_string(),
            email: "alex@example.com".to_string(),
        })
        .await;
    assert_eq!(validation_message(taken), "Email already in use.");

    let malformed = state
        .services
        .members
        .create(&MemberPayload {
            name: "Diego Ramirez".to_string(),
            email: "diego-at-example".to_string(),
        })
        .await;
    assert_eq!(validation_message(malformed), "Invalid email address");

    // Keeping one's own email is allowed, taking another's is not
    let kept = state
        .services
        .members
        .update(
            alex.id,
            &MemberPayload {
                name: "Alexandra Morgan".to_string(),
                email: "alex@example.com".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(kept.name, "Alexandra Morgan");
    assert_eq!(kept.registered_at, alex.registered_at);

    let stolen = state
        .services
        .members
        .update(
            priya.id,
            &MemberPayload {
                name: "Priya Patel".to_string(),
                email: "alex@example.com".to_string(),
            },
        )
        .await;
    assert!(stolen.is_err());
}

#[tokio::test]
async fn test_member_delete_guards_active_loans() {
    let state = test_state().await;
    let (_, _, book) = catalogue(&state).await;
    let member = member(&state, "Alex Morgan", "alex@example.com").await;

    let first = state.services.loans.borrow(&loan(book.id, member.id)).await.unwrap();

    let result = state.services.members.delete(member.id).await;
    assert_eq!(validation_message(result), "Cannot delete member with active loans");

    state.services.loans.return_loan(first.id).await.unwrap();
    state.services.members.delete(member.id).await.unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE member_id = ?")
        .bind(member.id)
        .fetch_one(&state.repository.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert!(is_not_found(&state.services.members.get(member.id).await));
}

#[tokio::test]
async fn test_members_with_active_loans_report() {
    let state = test_state().await;
    let (author, genre, dune) = catalogue(&state).await;
    let messiah = book(&state, "Dune Messiah", "9780441013593", author.id, genre.id).await;
    let children = book(&state, "Children of Dune", "9780441104024", author.id, genre.id).await;

    let zoe = member(&state, "Zoe Quinn", "zoe@example.com").await;
    let bea = member(&state, "Bea Stone", "bea@example.com").await;
    let cal = member(&state, "Cal Reyes", "cal@example.com").await;
    let idle = member(&state, "Idle Reader", "idle@example.com").await;

    let loans = &state.services.loans;
    loans.borrow(&loan(dune.id, zoe.id)).await.unwrap();
    loans.borrow(&loan(messiah.id, zoe.id)).await.unwrap();
    loans.borrow(&loan(dune.id, cal.id)).await.unwrap();
    loans.borrow(&loan(children.id, bea.id)).await.unwrap();
    let returned = loans.borrow(&loan(children.id, idle.id)).await.unwrap();
    loans.return_loan(returned.id).await.unwrap();

    let report = state.services.members.members_with_active_loans().await.unwrap();
    let rows: Vec<(&str, i64)> = report
        .iter()
        .map(|r| (r.name.as_str(), r.active_loans))
        .collect();
    assert_eq!(
        rows,
        vec![("Zoe Quinn", 2), ("Bea Stone", 1), ("Cal Reyes", 1)]
    );
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_double_borrow_fails_until_returned() {
    let state = test_state().await;
    let (_, _, book) = catalogue(&state).await;
    let member = member(&state, "Alex Morgan", "alex@example.com").await;
    let loans = &state.services.loans;

    let first = loans.borrow(&loan(book.id, member.id)).await.unwrap();
    assert!(first.is_active());
    assert_eq!(first.book_title, "Dune");
    assert_eq!(first.member_name, "Alex Morgan");

    let again = loans.borrow(&loan(book.id, member.id)).await;
    assert_eq!(
        validation_message(again),
        "Member already has an active loan for this book"
    );

    loans.return_loan(first.id).await.unwrap();
    let second = loans.borrow(&loan(book.id, member.id)).await.unwrap();
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn test_borrow_requires_existing_book_and_member() {
    let state = test_state().await;
    let (_, _, book) = catalogue(&state).await;
    let member = member(&state, "Alex Morgan", "alex@example.com").await;

    let no_book = state.services.loans.borrow(&loan(999, member.id)).await;
    assert_eq!(validation_message(no_book), "Please select a valid book.");

    let no_member = state.services.loans.borrow(&loan(book.id, 999)).await;
    assert_eq!(validation_message(no_member), "Please select a valid member.");
}

#[tokio::test]
async fn test_return_happens_once() {
    let state = test_state().await;
    let (_, _, book) = catalogue(&state).await;
    let member = member(&state, "Alex Morgan", "alex@example.com").await;
    let loans = &state.services.loans;

    let active = loans.borrow(&loan(book.id, member.id)).await.unwrap();
    let returned = loans.return_loan(active.id).await.unwrap();
    let return_date = returned.return_date.expect("return date stamped");

    let again = loans.return_loan(active.id).await;
    assert_eq!(validation_message(again), "Book already returned");

    let stored = loans.get(active.id).await.unwrap();
    assert_eq!(stored.return_date, Some(return_date));

    assert!(is_not_found(&loans.return_loan(31337).await));
}

#[tokio::test]
async fn test_overdue_loans_report() {
    let state = test_state().await;
    let (author, genre, dune) = catalogue(&state).await;
    let messiah = book(&state, "Dune Messiah", "9780441013593", author.id, genre.id).await;
    let children = book(&state, "Children of Dune", "9780441104024", author.id, genre.id).await;
    let member = member(&state, "Alex Morgan", "alex@example.com").await;

    let now = Utc::now();
    let repo = &state.repository.loans;
    let late = repo
        .create(dune.id, member.id, now - Duration::days(20))
        .await
        .unwrap();
    repo.create(messiah.id, member.id, now - Duration::days(10))
        .await
        .unwrap();
    let returned = repo
        .create(children.id, member.id, now - Duration::days(40))
        .await
        .unwrap();
    repo.mark_returned(returned.id, now - Duration::days(5))
        .await
        .unwrap();

    let overdue = state.services.loans.overdue_loans().await.unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].loan_id, late.id);
    assert_eq!(overdue[0].book_title, "Dune");
    assert_eq!(overdue[0].member_name, "Alex Morgan");
    assert_eq!(overdue[0].days_overdue, 6);
}

#[tokio::test]
async fn test_member_history_newest_first() {
    let state = test_state().await;
    let (author, genre, dune) = catalogue(&state).await;
    let messiah = book(&state, "Dune Messiah", "9780441013593", author.id, genre.id).await;
    let member = member(&state, "Alex Morgan", "alex@example.com").await;

    let now = Utc::now();
    let repo = &state.repository.loans;
    let old = repo
        .create(dune.id, member.id, now - Duration::days(30))
        .await
        .unwrap();
    repo.mark_returned(old.id, now - Duration::days(25)).await.unwrap();
    let recent = repo
        .create(messiah.id, member.id, now - Duration::days(2))
        .await
        .unwrap();

    let loans = &state.services.loans;
    let history = loans
        .member_history(member.id, Pagination::new(1, 10))
        .await
        .unwrap();
    let ids: Vec<i64> = history.iter().map(|h| h.loan_id).collect();
    assert_eq!(ids, vec![recent.id, old.id]);
    assert!(history[0].return_date.is_none());
    assert!(history[1].return_date.is_some());
    assert_eq!(loans.count_member_history(member.id).await.unwrap(), 2);

    let active = loans.active_loans_for_member(member.id).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].book_title, "Dune Messiah");

    assert!(is_not_found(
        &loans.member_history(999, Pagination::new(1, 10)).await
    ));
    assert!(is_not_found(&loans.count_member_history(999).await));
}

#[tokio::test]
async fn test_active_loans_listing() {
    let state = test_state().await;
    let (author, genre, dune) = catalogue(&state).await;
    let messiah = book(&state, "Dune Messiah", "9780441013593", author.id, genre.id).await;
    let member = member(&state, "Alex Morgan", "alex@example.com").await;

    let now = Utc::now();
    let repo = &state.repository.loans;
    let older = repo
        .create(dune.id, member.id, now - Duration::days(3))
        .await
        .unwrap();
    let newer = repo
        .create(messiah.id, member.id, now - Duration::days(1))
        .await
        .unwrap();

    let loans = &state.services.loans;
    let active = loans.list_active(Pagination::new(1, 10)).await.unwrap();
    let ids: Vec<i64> = active.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(loans.count_active().await.unwrap(), 2);

    loans.return_loan(older.id).await.unwrap();
    assert_eq!(loans.count_active().await.unwrap(), 1);
}

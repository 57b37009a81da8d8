//! Demo data for an empty database

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use sqlx::{Pool, Sqlite, SqliteConnection};

const GENRES: &[&str] = &["Sci-Fi", "Fantasy", "Dystopian", "Classic", "Horror", "Mystery"];

const AUTHORS: &[(&str, i32)] = &[
    ("Frank Herbert", 1920),
    ("J.R.R. Tolkien", 1892),
    ("George Orwell", 1903),
    ("Jane Austen", 1775),
    ("Andy Weir", 1972),
    ("Harper Lee", 1926),
    ("Aldous Huxley", 1894),
    ("Ursula K. Le Guin", 1929),
    ("Isaac Asimov", 1920),
    ("Philip K. Dick", 1928),
    ("Stephen King", 1947),
    ("Neil Gaiman", 1960),
    ("Brandon Sanderson", 1975),
    ("Agatha Christie", 1890),
];

/// (title, isbn, author, genre)
const BOOKS: &[(&str, &str, &str, &str)] = &[
    ("Dune", "9780441172719", "Frank Herbert", "Sci-Fi"),
    ("The Hobbit", "9780345339683", "J.R.R. Tolkien", "Fantasy"),
    ("1984", "9780451524935", "George Orwell", "Dystopian"),
    ("Pride and Prejudice", "9780141439518", "Jane Austen", "Classic"),
    ("The Martian", "9780553418026", "Andy Weir", "Sci-Fi"),
    ("To Kill a Mockingbird", "9780061120084", "Harper Lee", "Classic"),
    ("Brave New World", "9780060850524", "Aldous Huxley", "Dystopian"),
    ("Foundation", "9780553293357", "Isaac Asimov", "Sci-Fi"),
    ("The Shining", "9780307743657", "Stephen King", "Horror"),
    ("Mistborn", "9780765350381", "Brandon Sanderson", "Fantasy"),
    ("Murder on the Orient Express", "9780062693662", "Agatha Christie", "Mystery"),
];

const MEMBERS: &[(&str, &str)] = &[
    ("Alex Morgan", "alex@example.com"),
    ("Priya Patel", "priya@example.com"),
    ("Diego Ramirez", "diego@example.com"),
    ("Elena Popescu", "elena@example.com"),
    ("Andrei Ionescu", "andrei@example.com"),
];

/// Loan row to insert
#[derive(Debug, Clone)]
pub struct SeedLoan {
    pub book_id: i64,
    pub member_id: i64,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// Fill every empty table with demo records, all in one transaction
pub async fn seed_if_empty(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    if table_empty(&mut *tx, "genres").await? {
        for &name in GENRES {
            sqlx::query("INSERT INTO genres (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }
        tracing::info!("Seeded {} genres", GENRES.len());
    }

    if table_empty(&mut *tx, "authors").await? {
        for &(name, birth_year) in AUTHORS {
            sqlx::query("INSERT INTO authors (name, birth_year) VALUES (?, ?)")
                .bind(name)
                .bind(birth_year)
                .execute(&mut *tx)
                .await?;
        }
        tracing::info!("Seeded {} authors", AUTHORS.len());
    }

    if table_empty(&mut *tx, "books").await? {
        seed_books(&mut *tx).await?;
        tracing::info!("Seeded {} books", BOOKS.len());
    }

    if table_empty(&mut *tx, "members").await? {
        let registrations: Vec<DateTime<Utc>> = {
            let mut rng = rand::thread_rng();
            let base = now - Duration::days(90);
            MEMBERS
                .iter()
                .map(|_| base + Duration::days(rng.gen_range(0..=60)))
                .collect()
        };
        for (&(name, email), registered_at) in MEMBERS.iter().zip(registrations) {
            sqlx::query("INSERT INTO members (name, email, registered_at) VALUES (?, ?, ?)")
                .bind(name)
                .bind(email)
                .bind(registered_at)
                .execute(&mut *tx)
                .await?;
        }
        tracing::info!("Seeded {} members", MEMBERS.len());
    }

    if table_empty(&mut *tx, "loans").await? {
        let book_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM books ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;
        let members: Vec<(i64, DateTime<Utc>)> =
            sqlx::query_as("SELECT id, registered_at FROM members ORDER BY id")
                .fetch_all(&mut *tx)
                .await?;

        let loans = plan_loans(&book_ids, &members, now, &mut rand::thread_rng());
        for loan in &loans {
            sqlx::query(
                r#"
                INSERT INTO loans (book_id, member_id, loan_date, return_date)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(loan.book_id)
            .bind(loan.member_id)
            .bind(loan.loan_date)
            .bind(loan.return_date)
            .execute(&mut *tx)
            .await?;
        }
        tracing::info!("Seeded {} loans", loans.len());
    }

    tx.commit().await
}

async fn seed_books(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    let authors: HashMap<String, i64> =
        sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM authors")
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .map(|(id, name)| (name, id))
            .collect();
    let genres: HashMap<String, i64> =
        sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM genres")
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .map(|(id, name)| (name, id))
            .collect();

    for &(title, isbn, author, genre) in BOOKS {
        let book_id = sqlx::query("INSERT INTO books (title, isbn) VALUES (?, ?)")
            .bind(title)
            .bind(isbn)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();

        // Seed rows may have been removed by hand; link only what still exists.
        if let Some(author_id) = authors.get(author) {
            sqlx::query("INSERT INTO book_authors (book_id, author_id) VALUES (?, ?)")
                .bind(book_id)
                .bind(author_id)
                .execute(&mut *conn)
                .await?;
        }
        if let Some(genre_id) = genres.get(genre) {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)")
                .bind(book_id)
                .bind(genre_id)
                .execute(&mut *conn)
                .await?;
        }
    }
    Ok(())
}

/// Build a believable loan history: every book gets one to three loans to
/// a single member, only the last of which may still be open (and possibly
/// overdue).
pub fn plan_loans<R: Rng + ?Sized>(
    book_ids: &[i64],
    members: &[(i64, DateTime<Utc>)],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SeedLoan> {
    let mut loans = Vec::new();

    for &book_id in book_ids {
        let Some(&(member_id, registered_at)) = members.choose(rng) else {
            return loans;
        };
        let history = rng.gen_range(1..=3);
        let mut last_loan_date = registered_at;

        for i in 0..history {
            let mut loan_date = last_loan_date + Duration::days(rng.gen_range(10..=40));
            let is_active = i == history - 1 && rng.gen_bool(0.5);

            let return_date = if is_active {
                if rng.gen_bool(0.5) {
                    loan_date = now - Duration::days(rng.gen_range(15..=40));
                }
                None
            } else {
                Some(loan_date + Duration::days(rng.gen_range(7..=30)))
            };

            loans.push(SeedLoan {
                book_id,
                member_id,
                loan_date,
                return_date,
            });
            last_loan_date = loan_date;
        }
    }

    loans
}

async fn table_empty(conn: &mut SqliteConnection, table: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&mut *conn)
        .await?;
    Ok(count == 0)
}

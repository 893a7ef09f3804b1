use film_finder_db::SqliteCatalog;
use rusqlite::{Connection, params};

/// In-memory catalog with the three tables the searches read.
///
/// 22 "DRAGON nn" films (odd ones Action, even ones Drama, all 2006), plus
/// ACADEMY DINOSAUR (Documentary, 2006, "Drama" in its description),
/// ALIEN CENTER (Drama, 2005), ZORRO ARK (Action, 2006, no description) and
/// ÉCOLE ÉTÉ (Documentary, 2007).
pub fn catalog_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE film (
             film_id INTEGER PRIMARY KEY,
             title TEXT NOT NULL,
             description TEXT,
             release_year INTEGER
         );
         CREATE TABLE category (
             category_id INTEGER PRIMARY KEY,
             name TEXT NOT NULL
         );
         CREATE TABLE film_category (
             film_id INTEGER NOT NULL REFERENCES film(film_id),
             category_id INTEGER NOT NULL REFERENCES category(category_id),
             PRIMARY KEY (film_id, category_id)
         );
         INSERT INTO category (category_id, name) VALUES
             (1, 'Drama'), (2, 'Action'), (3, 'Documentary');",
    )
    .unwrap();

    let add = |id: i64, title: &str, description: Option<&str>, year: i64, category: i64| {
        conn.execute(
            "INSERT INTO film (film_id, title, description, release_year) VALUES (?1, ?2, ?3, ?4)",
            params![id, title, description, year],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO film_category (film_id, category_id) VALUES (?1, ?2)",
            params![id, category],
        )
        .unwrap();
    };

    // Inserted out of title order on purpose.
    add(1, "ZORRO ARK", None, 2006, 2);
    add(2, "ALIEN CENTER", Some("A Brilliant Story of a Cat"), 2005, 1);
    for i in (1..=22).rev() {
        let category = if i % 2 == 0 { 1 } else { 2 };
        add(
            100 + i,
            &format!("DRAGON {i:02}"),
            Some("A Fateful Story of a Boat"),
            2006,
            category,
        );
    }
    add(3, "ACADEMY DINOSAUR", Some("A Epic Drama of a Feminist"), 2006, 3);
    add(4, "ÉCOLE ÉTÉ", Some("A Quiet Story of a School"), 2007, 3);

    conn
}

pub fn catalog() -> SqliteCatalog {
    SqliteCatalog::from_connection(catalog_connection()).unwrap()
}

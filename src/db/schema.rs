//! SQL DDL for initializing the dictionary schema.
//! SQLite-first design; identifiers keep the casing the frontend and reports expect.

/// SQLite schema includes, in foreign-key order:
/// - `Language_family` / `Language_ancestor` (language tree)
/// - `Dialect_Uses` (dialects of a language)
/// - `LexicalEntry_LexicalCategory` / `LexicalEntry_Definition` (senses)
/// - `OrthographicForm` / `Represents` (written forms of a sense)
/// - `ExampleSentence_Has` (usage examples of a sense)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS Language_family (
    Family_name TEXT PRIMARY KEY NOT NULL,
    Ancestor TEXT NULL
);

CREATE TABLE IF NOT EXISTS Language_ancestor (
    Name TEXT PRIMARY KEY NOT NULL,
    Word_order TEXT NULL,
    Ancestor TEXT NULL REFERENCES Language_family(Family_name)
);

CREATE TABLE IF NOT EXISTS Dialect_Uses (
    Region TEXT NOT NULL,
    Ethnic_group TEXT NOT NULL,
    Language TEXT NOT NULL REFERENCES Language_ancestor(Name) ON DELETE CASCADE,
    PRIMARY KEY (Region, Ethnic_group, Language)
);

CREATE TABLE IF NOT EXISTS LexicalEntry_LexicalCategory (
    Lexical_category TEXT NOT NULL,
    Definition TEXT NOT NULL,
    PRIMARY KEY (Lexical_category, Definition)
);

-- LEID is allocated by SQLite; AUTOINCREMENT keeps ids of deleted rows retired.
CREATE TABLE IF NOT EXISTS LexicalEntry_Definition (
    LEID INTEGER PRIMARY KEY AUTOINCREMENT,
    Definition TEXT NOT NULL,
    Region TEXT NOT NULL,
    Ethnic_group TEXT NOT NULL,
    Language_name TEXT NOT NULL,
    FOREIGN KEY (Region, Ethnic_group, Language_name)
        REFERENCES Dialect_Uses(Region, Ethnic_group, Language) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_definition_language ON LexicalEntry_Definition(Language_name);

CREATE TABLE IF NOT EXISTS OrthographicForm (
    Spelling TEXT PRIMARY KEY NOT NULL,
    Num_characters INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS Represents (
    LEID INTEGER NOT NULL REFERENCES LexicalEntry_Definition(LEID) ON DELETE CASCADE,
    Spelling TEXT NOT NULL REFERENCES OrthographicForm(Spelling) ON DELETE CASCADE,
    Ethnic_group TEXT NOT NULL,
    PRIMARY KEY (LEID, Spelling)
);

CREATE INDEX IF NOT EXISTS idx_represents_spelling ON Represents(Spelling);

CREATE TABLE IF NOT EXISTS ExampleSentence_Has (
    Sentence TEXT NOT NULL,
    Source TEXT NULL,
    LEID INTEGER NOT NULL REFERENCES LexicalEntry_Definition(LEID) ON DELETE CASCADE,
    PRIMARY KEY (Sentence, LEID)
);
"#;

/// Drops every dictionary table, children first. Run before `SQLITE_INIT`
/// to reset the schema.
pub const SQLITE_DROP: &str = r#"
DROP TABLE IF EXISTS ExampleSentence_Has;
DROP TABLE IF EXISTS Represents;
DROP TABLE IF EXISTS OrthographicForm;
DROP TABLE IF EXISTS LexicalEntry_Definition;
DROP TABLE IF EXISTS LexicalEntry_LexicalCategory;
DROP TABLE IF EXISTS Dialect_Uses;
DROP TABLE IF EXISTS Language_ancestor;
DROP TABLE IF EXISTS Language_family;
"#;

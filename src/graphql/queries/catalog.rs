use super::prelude::*;

#[derive(Default)]
pub struct CatalogQueries;

#[Object]
impl CatalogQueries {
    /// Search across books and authors
    async fn search(&self) -> Result<Vec<SearchResult>> {
        Ok(vec![
            SearchResult::Author(Author {
                name: "test".to_string(),
            }),
            SearchResult::Book(Book {
                title: "test".to_string(),
            }),
        ])
    }

    /// All school works, each tagged with its concrete kind
    async fn school_works(&self) -> Result<Vec<Work>> {
        Ok(vec![
            Work::Coloring(ColoringWork {
                title: "test".to_string(),
                author: Author {
                    name: "a".to_string(),
                },
                colors: vec![Color {
                    name: "red".to_string(),
                }],
            }),
            Work::Text(TextWork {
                title: "essay".to_string(),
                author: Author {
                    name: "a".to_string(),
                },
                classes: vec![SchoolClass {
                    name: "history".to_string(),
                }],
            }),
        ])
    }
}

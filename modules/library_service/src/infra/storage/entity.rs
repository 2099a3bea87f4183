//! SeaORM entities for database tables

/// Books table entity
pub mod book {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "books")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        /// ISBN-10, ISBN-13 or `MAL-<id>`
        #[sea_orm(unique)]
        pub isbn: Option<String>,

        pub title: String,
        pub author: Option<String>,

        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,

        pub published_date: Option<String>,
        pub page_count: Option<i32>,
        pub thumbnail_url: Option<String>,

        /// Reading status code (TO_READ, CURRENTLY_READING, FINISHED, DNF)
        pub status: String,

        pub finished_date: Option<Date>,
        pub rating: Option<i32>,

        #[sea_orm(column_type = "Text", nullable)]
        pub notes: Option<String>,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::book_shelf::Entity")]
        BookShelf,
    }

    impl Related<super::book_shelf::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::BookShelf.def()
        }
    }

    impl Related<super::shelf::Entity> for Entity {
        fn to() -> RelationDef {
            super::book_shelf::Relation::Shelf.def()
        }

        fn via() -> Option<RelationDef> {
            Some(super::book_shelf::Relation::Book.def().rev())
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Shelves table entity
pub mod shelf {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "shelves")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        #[sea_orm(unique)]
        pub name: String,

        pub description: Option<String>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::book_shelf::Entity")]
        BookShelf,
    }

    impl Related<super::book_shelf::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::BookShelf.def()
        }
    }

    impl Related<super::book::Entity> for Entity {
        fn to() -> RelationDef {
            super::book_shelf::Relation::Book.def()
        }

        fn via() -> Option<RelationDef> {
            Some(super::book_shelf::Relation::Shelf.def().rev())
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Shelf membership join table
pub mod book_shelf {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "book_shelf")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub book_id: i64,

        #[sea_orm(primary_key, auto_increment = false)]
        pub shelf_id: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::book::Entity",
            from = "Column::BookId",
            to = "super::book::Column::Id",
            on_delete = "Cascade"
        )]
        Book,
        #[sea_orm(
            belongs_to = "super::shelf::Entity",
            from = "Column::ShelfId",
            to = "super::shelf::Column::Id",
            on_delete = "Cascade"
        )]
        Shelf,
    }

    impl Related<super::book::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Book.def()
        }
    }

    impl Related<super::shelf::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Shelf.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Reading goals table entity
pub mod reading_goal {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "reading_goals")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        pub target_books: i32,
        pub year: i32,
        pub start_date: Date,
        pub end_date: Date,
        pub description: Option<String>,
        pub is_active: bool,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

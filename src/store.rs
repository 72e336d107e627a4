use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
};

/// Durable storage for the movie collection, one row per film, unique on title.
#[derive(Clone, Debug)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            img_url: Set(new.img_url),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(movie) => {
                tracing::info!(id = movie.id, title = %movie.title, "movie added");
                Ok(movie)
            },
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AppError::DuplicateTitle { title })
            },
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound { id })
    }

    /// All stored movies by id. Display order is the ranking's concern.
    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    /// Overwrites rating and review; the value range is the caller's business.
    pub async fn update_rating(&self, id: i32, rating: f64, review: String) -> AppResult<()> {
        let res = movie::Entity::update_many()
            .set(movie::ActiveModel {
                rating: Set(Some(rating)),
                review: Set(Some(review)),
                ..Default::default()
            })
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if res.rows_affected == 0 {
            return Err(AppError::NotFound { id });
        }
        tracing::info!(id, rating, "movie rated");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound { id });
        }
        tracing::info!(id, "movie deleted");
        Ok(())
    }

    /// Writes derived ranks in one transaction.
    pub async fn save_ranks(&self, ranks: &[(i32, i32)]) -> AppResult<()> {
        if ranks.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;
        for &(id, rank) in ranks {
            movie::Entity::update_many()
                .set(movie::ActiveModel { ranking: Set(Some(rank)), ..Default::default() })
                .filter(movie::Column::Id.eq(id))
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        tracing::debug!(updated = ranks.len(), "ranks saved");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample(title: &str) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: 2021,
        description: format!("{title} synopsis"),
        img_url: format!("https://image.tmdb.org/t/p/w500/{}.jpg", title.to_lowercase()),
    }
}

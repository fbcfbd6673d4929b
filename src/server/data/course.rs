//! Course data repository.
//!
//! Provides `CourseRepository` for the course rows themselves and their author and
//! tag associations. Listing supports the learner enrollment filters by restricting
//! on a subquery over `user_courses`.

use chrono::Utc;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::{
    model::course::CourseFilter,
    server::model::{
        course::{CreateCourseParams, UpdateCourseParams},
        page::PageRequest,
    },
};

pub struct CourseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourseRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a course along with its authors and tags.
    ///
    /// Tags are matched by name and created when missing.
    ///
    /// # Arguments
    /// - `params` - Course fields, author user ids and tag names
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted course row
    /// - `Err(DbErr)` - Insert failed, including unknown author ids
    pub async fn create(&self, params: CreateCourseParams) -> Result<entity::course::Model, DbErr> {
        let now = Utc::now();
        let course = entity::course::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            requirements: ActiveValue::Set(params.requirements),
            what_you_learn: ActiveValue::Set(params.what_you_learn),
            background_color: ActiveValue::Set(params.background_color),
            icon_url: ActiveValue::Set(params.icon_url),
            duration: ActiveValue::Set(params.duration),
            difficulty_level: ActiveValue::Set(params.difficulty.as_str().to_string()),
            rating: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.set_authors(course.id, &params.author_ids).await?;
        self.set_tags(course.id, &params.tags).await?;

        Ok(course)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::course::Model>, DbErr> {
        entity::prelude::Course::find_by_id(id).one(self.db).await
    }

    /// Gets one page of courses ordered by id.
    ///
    /// # Arguments
    /// - `filter` - Enrollment filter, ignored when `user_id` is `None`
    /// - `user_id` - Learner the filter applies to
    /// - `request` - Page to fetch
    ///
    /// # Returns
    /// - `Ok((courses, total))` - Courses on the page and the count across all pages
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        filter: CourseFilter,
        user_id: Option<i32>,
        request: PageRequest,
    ) -> Result<(Vec<entity::course::Model>, u64), DbErr> {
        let mut query = entity::prelude::Course::find().order_by_asc(entity::course::Column::Id);

        if let Some(user_id) = user_id {
            let enrolled = Query::select()
                .column(entity::user_course::Column::CourseId)
                .from(entity::user_course::Entity)
                .and_where(entity::user_course::Column::UserId.eq(user_id))
                .to_owned();

            query = match filter {
                CourseFilter::All => query,
                CourseFilter::Learning => {
                    query.filter(entity::course::Column::Id.in_subquery(enrolled))
                }
                CourseFilter::Explore => {
                    query.filter(entity::course::Column::Id.not_in_subquery(enrolled))
                }
            };
        }

        let paginator = query.paginate(self.db, request.page_size);
        let total = paginator.num_items().await?;
        let courses = paginator.fetch_page(request.index()).await?;

        Ok((courses, total))
    }

    /// Applies a partial update.
    ///
    /// Present author and tag lists replace the stored associations.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - The updated course
    /// - `Ok(None)` - No course with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        params: UpdateCourseParams,
    ) -> Result<Option<entity::course::Model>, DbErr> {
        let Some(existing) = self.find_by_id(params.id).await? else {
            return Ok(None);
        };

        let mut active: entity::course::ActiveModel = existing.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(requirements) = params.requirements {
            active.requirements = ActiveValue::Set(Some(requirements));
        }
        if let Some(what_you_learn) = params.what_you_learn {
            active.what_you_learn = ActiveValue::Set(Some(what_you_learn));
        }
        if let Some(background_color) = params.background_color {
            active.background_color = ActiveValue::Set(Some(background_color));
        }
        if let Some(icon_url) = params.icon_url {
            active.icon_url = ActiveValue::Set(Some(icon_url));
        }
        if let Some(duration) = params.duration {
            active.duration = ActiveValue::Set(duration);
        }
        if let Some(difficulty) = params.difficulty {
            active.difficulty_level = ActiveValue::Set(difficulty.as_str().to_string());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let course = active.update(self.db).await?;

        if let Some(author_ids) = params.author_ids {
            entity::prelude::CourseAuthor::delete_many()
                .filter(entity::course_author::Column::CourseId.eq(course.id))
                .exec(self.db)
                .await?;
            self.set_authors(course.id, &author_ids).await?;
        }

        if let Some(tags) = params.tags {
            entity::prelude::CourseTag::delete_many()
                .filter(entity::course_tag::Column::CourseId.eq(course.id))
                .exec(self.db)
                .await?;
            self.set_tags(course.id, &tags).await?;
        }

        Ok(Some(course))
    }

    /// Deletes a course. Units, modules and sections go with it through cascades.
    ///
    /// # Returns
    /// - `Ok(rows)` - Number of deleted courses, 0 when the id is unknown
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Course::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets the authors of several courses in one query per table.
    ///
    /// # Returns
    /// - `Ok(Vec<(course_id, user)>)` - Author rows keyed by course, ordered by user id
    /// - `Err(DbErr)` - Database error during query
    pub async fn authors_for(
        &self,
        course_ids: &[i32],
    ) -> Result<Vec<(i32, entity::user::Model)>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let links = entity::prelude::CourseAuthor::find()
            .filter(entity::course_author::Column::CourseId.is_in(course_ids.to_vec()))
            .order_by_asc(entity::course_author::Column::UserId)
            .all(self.db)
            .await?;

        let user_ids: Vec<i32> = links.iter().map(|link| link.user_id).collect();
        let users: HashMap<i32, entity::user::Model> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::User::find()
                .filter(entity::user::Column::Id.is_in(user_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|user| (user.id, user))
                .collect()
        };

        Ok(links
            .into_iter()
            .filter_map(|link| {
                users
                    .get(&link.user_id)
                    .cloned()
                    .map(|user| (link.course_id, user))
            })
            .collect())
    }

    /// Gets the tags of several courses, ordered by tag name.
    pub async fn tags_for(
        &self,
        course_ids: &[i32],
    ) -> Result<Vec<(i32, entity::tag::Model)>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let links = entity::prelude::CourseTag::find()
            .filter(entity::course_tag::Column::CourseId.is_in(course_ids.to_vec()))
            .all(self.db)
            .await?;

        let tag_ids: Vec<i32> = links.iter().map(|link| link.tag_id).collect();
        let tags: HashMap<i32, entity::tag::Model> = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Tag::find()
                .filter(entity::tag::Column::Id.is_in(tag_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|tag| (tag.id, tag))
                .collect()
        };

        let mut result: Vec<(i32, entity::tag::Model)> = links
            .into_iter()
            .filter_map(|link| {
                tags.get(&link.tag_id)
                    .cloned()
                    .map(|tag| (link.course_id, tag))
            })
            .collect();
        result.sort_by(|a, b| a.1.name.cmp(&b.1.name));

        Ok(result)
    }

    async fn set_authors(&self, course_id: i32, author_ids: &[i32]) -> Result<(), DbErr> {
        let mut seen = Vec::with_capacity(author_ids.len());
        for &user_id in author_ids {
            if seen.contains(&user_id) {
                continue;
            }
            seen.push(user_id);

            entity::course_author::ActiveModel {
                course_id: ActiveValue::Set(course_id),
                user_id: ActiveValue::Set(user_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    async fn set_tags(&self, course_id: i32, names: &[String]) -> Result<(), DbErr> {
        let mut seen: Vec<i32> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let existing = entity::prelude::Tag::find()
                .filter(entity::tag::Column::Name.eq(name))
                .one(self.db)
                .await?;

            let tag = match existing {
                Some(tag) => tag,
                None => {
                    entity::tag::ActiveModel {
                        name: ActiveValue::Set(name.to_string()),
                        ..Default::default()
                    }
                    .insert(self.db)
                    .await?
                }
            };

            if seen.contains(&tag.id) {
                continue;
            }
            seen.push(tag.id);

            entity::course_tag::ActiveModel {
                course_id: ActiveValue::Set(course_id),
                tag_id: ActiveValue::Set(tag.id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    entities::course::{Course, CourseInsert, CourseRow, CourseSkillRow},
    entities::skill::SkillTag,
    errors::AppError,
    repositories::sqlx_repo::SqlxCourseRepo,
};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Lists courses, most recently completed first, with their tagged skills
    async fn list_courses(&self) -> Result<Vec<Course>, AppError>;

    async fn get_course(&self, id: Uuid) -> Result<Course, AppError>;

    /// Inserts the course and its skill tags in one transaction
    async fn create_course(&self, course: &CourseInsert) -> Result<Course, AppError>;

    /// Updates the course and replaces its skill tags in one transaction
    async fn update_course(&self, id: Uuid, course: &CourseInsert) -> Result<Course, AppError>;

    async fn delete_course(&self, id: Uuid) -> Result<(), AppError>;

    async fn count_courses(&self) -> Result<i64, AppError>;
}

impl SqlxCourseRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCourseRepo { pool }
    }

    async fn skills_for(&self, course_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<SkillTag>>, AppError> {
        let rows = sqlx::query_as::<_, CourseSkillRow>(
            r#"
            SELECT cs.course_id, s.id AS skill_id, s.name AS skill_name
            FROM course_skills cs
            JOIN skills s ON s.id = cs.skill_id
            WHERE cs.course_id = ANY($1)
            ORDER BY s.name
            "#,
        )
        .bind(course_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut tags: HashMap<Uuid, Vec<SkillTag>> = HashMap::new();
        for row in rows {
            tags.entry(row.course_id).or_default().push(SkillTag {
                id: row.skill_id,
                name: row.skill_name,
            });
        }
        Ok(tags)
    }

    async fn replace_tags(
        tx: &mut Transaction<'_, Postgres>,
        course_id: Uuid,
        skill_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM course_skills WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut **tx)
            .await?;

        if skill_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO course_skills (course_id, skill_id)
            SELECT $1, skill_id FROM UNNEST($2::uuid[]) AS t(skill_id)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(course_id)
        .bind(skill_ids)
        .execute(&mut **tx)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("One or more tagged skills do not exist".to_string()),
            other => other,
        })?;

        Ok(())
    }
}

#[async_trait]
impl CourseRepository for SqlxCourseRepo {
    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let rows = sqlx::query_as::<_, CourseRow>(
            "SELECT * FROM courses ORDER BY completed_on DESC, name",
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut tags = self.skills_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let skills = tags.remove(&row.id).unwrap_or_default();
                Course::from_row(row, skills)
            })
            .collect())
    }

    async fn get_course(&self, id: Uuid) -> Result<Course, AppError> {
        let row = sqlx::query_as::<_, CourseRow>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".into()))?;

        let skills = self.skills_for(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(Course::from_row(row, skills))
    }

    async fn create_course(&self, course: &CourseInsert) -> Result<Course, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            INSERT INTO courses (
                name, course_type, institution, completed_on,
                workload_hours, certificate_url, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&course.name)
        .bind(course.course_type)
        .bind(&course.institution)
        .bind(course.completed_on)
        .bind(course.workload_hours)
        .bind(&course.certificate_url)
        .bind(&course.notes)
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_tags(&mut tx, row.id, &course.skill_ids).await?;
        tx.commit().await?;

        self.get_course(row.id).await
    }

    async fn update_course(&self, id: Uuid, course: &CourseInsert) -> Result<Course, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            UPDATE courses
            SET
                name = $2,
                course_type = $3,
                institution = $4,
                completed_on = $5,
                workload_hours = $6,
                certificate_url = $7,
                notes = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&course.name)
        .bind(course.course_type)
        .bind(&course.institution)
        .bind(course.completed_on)
        .bind(course.workload_hours)
        .bind(&course.certificate_url)
        .bind(&course.notes)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))?;

        Self::replace_tags(&mut tx, row.id, &course.skill_ids).await?;
        tx.commit().await?;

        self.get_course(row.id).await
    }

    async fn delete_course(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Course not found".into()));
        }

        Ok(())
    }

    async fn count_courses(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

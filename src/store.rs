use async_trait::async_trait;
use sqlx::PgPool;

use crate::import::MemberStore;
use crate::models::NewMember;

pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn member_exists(&self, email: &str) -> anyhow::Result<bool> {
        let row = sqlx::query("SELECT id FROM members WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn insert_member(&self, member: &NewMember) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members
            (user_id, legacy_user_id, first_name, last_name, display_name, email,
             cpd_activities_count, cpd_points_total, cpd_goal_achieved, cpd_goal_target,
             membership_status, membership_type, receive_newsletters, receive_event_notifications)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(member.user_id)
        .bind(member.legacy_user_id)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.display_name)
        .bind(&member.email)
        .bind(member.cpd_activities_count)
        .bind(member.cpd_points_total)
        .bind(member.cpd_goal_achieved)
        .bind(member.cpd_goal_target)
        .bind(&member.membership_status)
        .bind(&member.membership_type)
        .bind(member.receive_newsletters)
        .bind(member.receive_event_notifications)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

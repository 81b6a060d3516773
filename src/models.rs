use anyhow::Context;
use uuid::Uuid;

/// One normalized row from the legacy CSV export. The email is trimmed and
/// lower-cased at construction; everything downstream relies on that.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub activities: String,
    pub points: String,
    pub goal_status: String,
}

/// The member row as it is inserted into the store. Built once per imported
/// record via [`NewMember::from_record`], never updated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub user_id: Option<Uuid>,
    pub legacy_user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub email: String,
    pub cpd_activities_count: i32,
    pub cpd_points_total: f64,
    pub cpd_goal_achieved: f64,
    pub cpd_goal_target: f64,
    pub membership_status: String,
    pub membership_type: String,
    pub receive_newsletters: bool,
    pub receive_event_notifications: bool,
}

impl NewMember {
    pub fn from_record(user: &UserRecord, auth_user_id: Option<Uuid>) -> anyhow::Result<Self> {
        let legacy_user_id = if user.user_id.is_empty() {
            None
        } else {
            Some(
                user.user_id
                    .parse::<i64>()
                    .with_context(|| format!("invalid legacy user id {:?}", user.user_id))?,
            )
        };

        let cpd_activities_count = if user.activities.is_empty() {
            0
        } else {
            user.activities
                .parse::<i32>()
                .with_context(|| format!("invalid activity count {:?}", user.activities))?
        };

        let cpd_points_total = if user.points.is_empty() {
            0.0
        } else {
            user.points
                .parse::<f64>()
                .with_context(|| format!("invalid points total {:?}", user.points))?
        };

        let (cpd_goal_achieved, cpd_goal_target) = parse_goal_status(&user.goal_status)?;

        Ok(Self {
            user_id: auth_user_id,
            legacy_user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            display_name: format!("{} {}", user.first_name, user.last_name),
            email: user.email.clone(),
            cpd_activities_count,
            cpd_points_total,
            cpd_goal_achieved,
            cpd_goal_target,
            membership_status: "active".to_string(),
            membership_type: "standard".to_string(),
            receive_newsletters: true,
            receive_event_notifications: true,
        })
    }
}

/// Splits an `"achieved / target"` pair on `/`. A missing or empty part is
/// zero; anything beyond the second part is ignored.
pub fn parse_goal_status(raw: &str) -> anyhow::Result<(f64, f64)> {
    let mut parts = raw.split('/');
    let achieved = parse_goal_part(parts.next().unwrap_or(""))?;
    let target = parse_goal_part(parts.next().unwrap_or(""))?;
    Ok((achieved, target))
}

fn parse_goal_part(part: &str) -> anyhow::Result<f64> {
    let part = part.trim();
    if part.is_empty() {
        return Ok(0.0);
    }
    part.parse::<f64>()
        .with_context(|| format!("invalid goal value {part:?}"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordError {
    pub email: String,
    pub message: String,
}

/// Counters for one run. `errors` keeps the per-record failure messages for
/// the final report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub existing: usize,
    pub auth_created: usize,
    pub errors: Vec<RecordError>,
}

impl ImportStats {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn processed(&self) -> usize {
        self.successful + self.failed + self.existing
    }

    pub fn record_failure(&mut self, email: &str, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(RecordError {
            email: email.to_string(),
            message: message.into(),
        });
    }
}

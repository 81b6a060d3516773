use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use validator::ValidateEmail;

use crate::models::UserRecord;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "User Id", default)]
    user_id: String,
    #[serde(rename = "First Name", default)]
    first_name: String,
    #[serde(rename = "Last Name", default)]
    last_name: String,
    #[serde(rename = "Email", default)]
    email: String,
    #[serde(rename = "Activities", default = "zero_count")]
    activities: String,
    #[serde(rename = "Points", default = "zero_points")]
    points: String,
    #[serde(rename = "Goal Status", default = "zero_goal")]
    goal_status: String,
}

fn zero_count() -> String {
    "0".to_string()
}

fn zero_points() -> String {
    "0.00".to_string()
}

fn zero_goal() -> String {
    "0 / 0".to_string()
}

/// Reads the export into ordered records. Any read or parse error is fatal;
/// there is nothing sensible to import from a broken file.
pub fn read_users(path: &Path) -> anyhow::Result<Vec<UserRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut users = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        let row = result.with_context(|| format!("malformed row in {}", path.display()))?;
        users.push(UserRecord {
            user_id: row.user_id.trim().to_string(),
            first_name: row.first_name.trim().to_string(),
            last_name: row.last_name.trim().to_string(),
            email: row.email.trim().to_lowercase(),
            activities: row.activities.trim().to_string(),
            points: row.points.trim().to_string(),
            goal_status: row.goal_status.trim().to_string(),
        });
    }

    Ok(users)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowIssue {
    pub row: usize,
    pub field: &'static str,
    pub message: String,
}

/// Pre-flight check over parsed records: required fields and email shape.
/// Row numbers are 1-based data rows, matching what an operator sees in a
/// spreadsheet minus the header.
pub fn validate_users(users: &[UserRecord]) -> Vec<RowIssue> {
    let mut issues = Vec::new();

    for (index, user) in users.iter().enumerate() {
        let row = index + 1;

        if user.user_id.is_empty() {
            issues.push(RowIssue {
                row,
                field: "User Id",
                message: "user id is required".to_string(),
            });
        }
        if user.first_name.is_empty() {
            issues.push(RowIssue {
                row,
                field: "First Name",
                message: "first name is required".to_string(),
            });
        }
        if user.last_name.is_empty() {
            issues.push(RowIssue {
                row,
                field: "Last Name",
                message: "last name is required".to_string(),
            });
        }
        if user.email.is_empty() {
            issues.push(RowIssue {
                row,
                field: "Email",
                message: "email is required".to_string(),
            });
        } else if !user.email.validate_email() {
            issues.push(RowIssue {
                row,
                field: "Email",
                message: format!("{:?} is not a valid email address", user.email),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_and_normalizes_rows() {
        let file = write_csv(
            "User Id,First Name,Last Name,Email,Activities,Points,Goal Status\n\
             42, Ana , Silva ,  ANA@X.COM  ,3,12.5,2 / 5\n",
        );

        let users = read_users(file.path()).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_id, "42");
        assert_eq!(users[0].first_name, "Ana");
        assert_eq!(users[0].last_name, "Silva");
        assert_eq!(users[0].email, "ana@x.com");
        assert_eq!(users[0].goal_status, "2 / 5");
    }

    #[test]
    fn absent_columns_get_defaults() {
        let file = write_csv(
            "User Id,First Name,Last Name,Email\n\
             7,Lee,Park,lee@x.com\n",
        );

        let users = read_users(file.path()).unwrap();
        assert_eq!(users[0].activities, "0");
        assert_eq!(users[0].points, "0.00");
        assert_eq!(users[0].goal_status, "0 / 0");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_users(Path::new("does-not-exist.csv")).is_err());
    }

    #[test]
    fn validation_flags_missing_and_malformed_fields() {
        let file = write_csv(
            "User Id,First Name,Last Name,Email\n\
             1,Ana,Silva,ana@x.com\n\
             ,,Park,not-an-email\n",
        );

        let users = read_users(file.path()).unwrap();
        let issues = validate_users(&users);

        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|issue| issue.row == 2));
        assert!(issues.iter().any(|issue| issue.field == "User Id"));
        assert!(issues.iter().any(|issue| issue.field == "First Name"));
        assert!(issues
            .iter()
            .any(|issue| issue.field == "Email" && issue.message.contains("not-an-email")));
    }

    #[test]
    fn validation_passes_clean_rows() {
        let file = write_csv(
            "User Id,First Name,Last Name,Email,Activities,Points,Goal Status\n\
             1,Ana,Silva,ana@x.com,3,12.5,2 / 5\n",
        );

        let users = read_users(file.path()).unwrap();
        assert!(validate_users(&users).is_empty());
    }
}

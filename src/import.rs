use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::models::{ImportStats, NewMember, UserRecord};
use crate::password;

#[async_trait]
pub trait MemberStore {
    async fn member_exists(&self, email: &str) -> anyhow::Result<bool>;
    async fn insert_member(&self, member: &NewMember) -> anyhow::Result<()>;
}

#[async_trait]
pub trait AuthProvisioner {
    async fn create_account(&self, user: &UserRecord, password: &str) -> Result<Uuid, AuthError>;
}

pub trait Prompt {
    fn confirm(&mut self, message: &str) -> anyhow::Result<bool>;
}

/// Stands in for the interactive prompt when `--yes` is passed.
pub struct AutoConfirm;

impl Prompt for AutoConfirm {
    fn confirm(&mut self, _message: &str) -> anyhow::Result<bool> {
        Ok(true)
    }
}

#[derive(Debug)]
pub enum ImportEvent<'a> {
    Processing {
        index: usize,
        total: usize,
        email: &'a str,
    },
    SkippedExisting {
        email: &'a str,
    },
    CheckFailed {
        email: &'a str,
        message: &'a str,
    },
    AuthCreated {
        email: &'a str,
    },
    AuthFailed {
        email: &'a str,
        message: &'a str,
    },
    MemberCreated {
        email: &'a str,
    },
    MemberFailed {
        email: &'a str,
        message: &'a str,
    },
    Progress {
        stats: &'a ImportStats,
    },
}

pub trait Reporter {
    fn emit(&mut self, event: ImportEvent<'_>);
}

#[derive(Debug, PartialEq)]
pub enum ImportOutcome {
    /// Confirmation declined; nothing was looked up or written.
    Aborted,
    Completed(ImportStats),
}

const PROGRESS_INTERVAL: usize = 10;

/// Drives the whole run: confirmation gate, then one record at a time
/// through existence check, optional auth provisioning, and member insert.
/// Every per-record error is counted and reported, never fatal.
pub async fn run<S, A, P, R>(
    store: &S,
    auth: Option<&A>,
    users: &[UserRecord],
    prompt: &mut P,
    reporter: &mut R,
) -> anyhow::Result<ImportOutcome>
where
    S: MemberStore,
    A: AuthProvisioner,
    P: Prompt,
    R: Reporter,
{
    let message = format!(
        "Ready to import {} users (auth accounts: {})",
        users.len(),
        if auth.is_some() { "yes" } else { "no" }
    );
    if !prompt.confirm(&message)? {
        return Ok(ImportOutcome::Aborted);
    }

    let mut stats = ImportStats::new(users.len());

    for (index, user) in users.iter().enumerate() {
        let position = index + 1;
        reporter.emit(ImportEvent::Processing {
            index: position,
            total: users.len(),
            email: &user.email,
        });

        match store.member_exists(&user.email).await {
            Ok(true) => {
                stats.existing += 1;
                reporter.emit(ImportEvent::SkippedExisting { email: &user.email });
            }
            Ok(false) => {
                let mut auth_user_id = None;
                if let Some(provisioner) = auth {
                    match provisioner.create_account(user, &password::generate()).await {
                        Ok(id) => {
                            auth_user_id = Some(id);
                            reporter.emit(ImportEvent::AuthCreated { email: &user.email });
                        }
                        Err(err) => {
                            let message = err.to_string();
                            reporter.emit(ImportEvent::AuthFailed {
                                email: &user.email,
                                message: &message,
                            });
                        }
                    }
                }

                let inserted = match NewMember::from_record(user, auth_user_id) {
                    Ok(member) => store.insert_member(&member).await,
                    Err(err) => Err(err),
                };

                match inserted {
                    Ok(()) => {
                        stats.successful += 1;
                        if auth_user_id.is_some() {
                            stats.auth_created += 1;
                        }
                        reporter.emit(ImportEvent::MemberCreated { email: &user.email });
                    }
                    Err(err) => {
                        let message = format!("{err:#}");
                        reporter.emit(ImportEvent::MemberFailed {
                            email: &user.email,
                            message: &message,
                        });
                        stats.record_failure(&user.email, message);
                    }
                }
            }
            Err(err) => {
                // Lookup failures fail the record instead of risking a
                // duplicate import.
                let message = format!("{err:#}");
                reporter.emit(ImportEvent::CheckFailed {
                    email: &user.email,
                    message: &message,
                });
                stats.record_failure(&user.email, message);
            }
        }

        if position % PROGRESS_INTERVAL == 0 {
            reporter.emit(ImportEvent::Progress { stats: &stats });
        }
    }

    Ok(ImportOutcome::Completed(stats))
}

//! Console runner: wires the roster engine to the HTTP remote.
//!
//! Loads configuration, builds a session from the environment, fetches the
//! first page of students, and prints the derived table. Actions emitted by
//! the event handler are executed against the remote and their resolutions
//! fed back in as events, the same loop a full front end would run.

use rosterdeck::app::state::RosterState;
use rosterdeck::domain::record::RosterRecord;
use rosterdeck::domain::Student;
use rosterdeck::observability::init_tracing;
use rosterdeck::ui::{student_viewmodel, RosterViewModel};
use rosterdeck::{
    handle_event, Config, HttpRemote, ModerationAction, MutationSink, RecordSource, RosterAction,
    RosterEvent, Session,
};
use rosterdeck::{RemoteResponse, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    init_tracing(&config);

    let session = Session::from_env();
    let remote = HttpRemote::new(&config)?;
    let mut state: RosterState<Student> = rosterdeck::initialize(&config);

    state.loading = true;
    let mut pending = vec![RosterAction::Fetch {
        query: state.page_query(),
    }];

    while let Some(action) = pending.pop() {
        let response = execute(&remote, &session, action).await;
        let (_, actions) = handle_event(&mut state, &session, RosterEvent::Remote(response))?;
        pending.extend(actions);
    }

    render(&student_viewmodel(&state));
    Ok(())
}

/// Config path from the first argument, falling back to `rosterdeck.toml` in
/// the working directory, falling back to defaults.
fn load_config() -> Result<Config> {
    if let Some(path) = std::env::args().nth(1) {
        return Config::from_file(path);
    }
    let default_path = std::path::Path::new("rosterdeck.toml");
    if default_path.exists() {
        return Config::from_file(default_path);
    }
    Ok(Config::default())
}

/// Executes one emitted action against the remote and shapes the outcome as
/// the event the handler expects.
async fn execute(
    remote: &HttpRemote,
    session: &Session,
    action: RosterAction,
) -> RemoteResponse<Student> {
    match action {
        RosterAction::Fetch { query } => match remote.fetch(session, &query).await {
            Ok(payload) => RemoteResponse::PageLoaded {
                records: payload.items,
            },
            Err(e) => RemoteResponse::FetchFailed {
                message: e.to_string(),
            },
        },

        RosterAction::Approve { uid } => {
            match remote.approve(session, Student::RESOURCE, &uid).await {
                Ok(()) => RemoteResponse::MutationApplied {
                    uid,
                    action: ModerationAction::Approve,
                },
                Err(e) => RemoteResponse::MutationRejected {
                    uid,
                    action: ModerationAction::Approve,
                    message: e.to_string(),
                },
            }
        }

        RosterAction::Delete { uid } => {
            match remote.delete(session, Student::RESOURCE, &uid).await {
                Ok(()) => RemoteResponse::MutationApplied {
                    uid,
                    action: ModerationAction::Delete,
                },
                Err(e) => RemoteResponse::MutationRejected {
                    uid,
                    action: ModerationAction::Delete,
                    message: e.to_string(),
                },
            }
        }

        RosterAction::UpdateFields { uid, patch } => {
            match remote.update_fields::<Student>(session, &uid, &patch).await {
                Ok(record) => RemoteResponse::RecordUpdated { record },
                Err(e) => RemoteResponse::UpdateRejected {
                    uid,
                    message: e.to_string(),
                },
            }
        }
    }
}

fn render(vm: &RosterViewModel) {
    if let Some(banner) = &vm.banner {
        eprintln!("[{:?}] {}", banner.kind, banner.message);
    }

    println!(
        "{:<24} {:<24} {:>3} {:>7} {:>6} {:>7} {:>6} {:>7}",
        "NAME", "SCHOOL", "STD", "SCORE", "GLOBAL", "COUNTRY", "STATE", "PAYMENT"
    );
    for row in &vm.rows {
        println!(
            "{:<24} {:<24} {:>3} {:>7} {:>6} {:>7} {:>6} {:>7}",
            row.name,
            row.school,
            row.standard,
            row.score,
            row.global_rank,
            row.country_rank,
            row.state_rank,
            row.payment
        );
    }
    println!("page {} ({} rows)", vm.page, vm.rows.len());
}

//! Command-line front end for the Vstrecha event service.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use vstrecha_client::domain::ports::{EventsApi, FilesApi, FriendsApi, PageSource, ProfilesApi};
use vstrecha_client::domain::{
    ApiError, EventFilter, EventId, EventPeriod, ExtendedEvent, FileKind, FileUpload,
    InvitationToken, ListState, ListStore, LoadOutcome, Profile, ProfileId, RegistrationStatus,
    registration_status_now,
};
use vstrecha_client::outbound::notifier::TracingNotifier;
use vstrecha_client::{ClientSettings, Session};

/// `vstrecha` command arguments.
#[derive(Debug, Parser)]
#[command(name = "vstrecha", about = "Browse and manage Vstrecha events", version)]
struct CliArgs {
    /// API root. Falls back to `VSTRECHA_BASE_URL`, then the production service.
    #[arg(long = "base-url", value_name = "url", global = true)]
    base_url: Option<String>,
    /// Mini-app init data. Falls back to `VSTRECHA_INIT_DATA`.
    #[arg(long = "init-data", value_name = "data", global = true)]
    init_data: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List events page by page.
    Events {
        /// List your own events instead of everyone's.
        #[arg(long)]
        mine: bool,
        /// Only events carrying this tag; repeatable.
        #[arg(long = "tag", value_name = "tag")]
        tags: Vec<String>,
        /// Time slice of your own events.
        #[arg(long, value_enum, requires = "mine")]
        period: Option<PeriodArg>,
        /// Number of pages to load.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Show one event.
    Event { id: String },
    /// Register for an event.
    Join { id: String },
    /// Cancel a registration.
    Leave { id: String },
    /// List permitted tags.
    Tags,
    /// Show a profile; your own when no id is given.
    Profile { id: Option<String> },
    /// List a member's friends; yours when no id is given.
    Friends { id: Option<String> },
    /// Create a shareable invitation link.
    Invite,
    /// Accept a friend invitation.
    Accept { token: String },
    /// Upload an avatar or event cover.
    Upload {
        /// File to upload.
        path: PathBuf,
        /// What the file is for.
        #[arg(long, value_parser = parse_file_kind)]
        kind: FileKind,
        /// MIME type; guessed from the extension when omitted.
        #[arg(long = "mime", value_name = "type")]
        mime_type: Option<String>,
    },
    /// Check a participant in by their ticket.
    Scan { participation_id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PeriodArg {
    All,
    Past,
    Actual,
}

impl From<PeriodArg> for EventPeriod {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::All => Self::All,
            PeriodArg::Past => Self::Past,
            PeriodArg::Actual => Self::Actual,
        }
    }
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let mut settings = ClientSettings::load_from_iter([OsString::from("vstrecha")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    if args.base_url.is_some() {
        settings.base_url = args.base_url;
    }
    if args.init_data.is_some() {
        settings.init_data = args.init_data;
    }

    let session = Session::connect(&settings, Arc::new(TracingNotifier))
        .map_err(|error| io::Error::other(format!("start session: {error}")))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&session, args.command, &mut out).await
}

async fn run(session: &Session, command: Command, out: &mut impl Write) -> io::Result<()> {
    let api = session.api();
    match command {
        Command::Events {
            mine,
            tags,
            period,
            pages,
        } => {
            let filter = EventFilter {
                period: period.map(EventPeriod::from),
                ..EventFilter::with_tags(tags)
            };
            let state = if mine {
                load_pages(session.user_events(), filter, pages).await?
            } else {
                load_pages(session.global_events(), filter, pages).await?
            };
            write_event_list(out, &state)
        }
        Command::Event { id } => {
            let event = api.fetch_event(&EventId::new(id)).await.map_err(api_failure)?;
            write_event(out, &event)?;
            let status = registration_status_now(&event.event, &DefaultClock);
            writeln!(out, "registration={}", describe_status(status))
        }
        Command::Join { id } => {
            let event = api.select_event(&EventId::new(id)).await.map_err(api_failure)?;
            writeln!(
                out,
                "joined {} ({} participants)",
                event.title, event.participants
            )
        }
        Command::Leave { id } => {
            let message = api
                .deselect_event(&EventId::new(id))
                .await
                .map_err(api_failure)?;
            writeln!(out, "{message}")
        }
        Command::Tags => {
            for tag in api.list_tags().await.map_err(api_failure)? {
                writeln!(out, "{tag}")?;
            }
            Ok(())
        }
        Command::Profile { id } => {
            let profile = match id {
                Some(id) => Some(api.fetch_profile(&ProfileId::new(id)).await.map_err(api_failure)?),
                None => api.my_profile().await.map_err(api_failure)?,
            };
            match profile {
                Some(profile) => write_profile(out, &profile),
                None => writeln!(out, "no profile yet"),
            }
        }
        Command::Friends { id } => {
            let id = match id {
                Some(id) => ProfileId::new(id),
                None => own_profile_id(session).await?,
            };
            for friend in api.list_friends(&id).await.map_err(api_failure)? {
                writeln!(out, "{}\t{}", friend.id, friend.display_name())?;
            }
            Ok(())
        }
        Command::Invite => {
            let link = session.invitation_link().await.map_err(api_failure)?;
            writeln!(out, "{link}")
        }
        Command::Accept { token } => {
            let token = InvitationToken::new(token);
            let inviter = api.check_invitation(&token).await.map_err(api_failure)?;
            api.accept_invitation(&token).await.map_err(api_failure)?;
            writeln!(out, "now friends with {}", inviter.display_name())
        }
        Command::Upload {
            path,
            kind,
            mime_type,
        } => {
            let upload = read_upload(&path, mime_type)?;
            let stored = api.upload_file(upload, kind).await.map_err(api_failure)?;
            writeln!(out, "id={}", stored.id)?;
            writeln!(out, "url={}", stored.url)
        }
        Command::Scan { participation_id } => {
            let scan = api
                .scan_ticket(&participation_id)
                .await
                .map_err(api_failure)?;
            writeln!(out, "user_id={}", scan.user_id)?;
            writeln!(out, "event_id={}", scan.event_id)
        }
    }
}

/// Reload, then load further pages until `pages` are held or the list ends.
async fn load_pages<S: PageSource>(
    store: &ListStore<S>,
    filter: S::Filter,
    pages: u32,
) -> io::Result<ListState<S::Item>> {
    let mut outcome = store.reload(filter.clone()).await;
    for _ in 1..pages {
        if store.snapshot().exhausted {
            break;
        }
        match outcome {
            LoadOutcome::Loaded { .. } => outcome = store.load_more(filter.clone()).await,
            _ => break,
        }
    }
    match outcome {
        LoadOutcome::Failed => Err(io::Error::other(format!("could not load {}", store.name()))),
        _ => Ok(store.snapshot()),
    }
}

async fn own_profile_id(session: &Session) -> io::Result<ProfileId> {
    session
        .api()
        .my_profile()
        .await
        .map_err(api_failure)?
        .map(|profile| profile.id)
        .ok_or_else(|| io::Error::other("no profile yet; pass a profile id"))
}

fn api_failure(error: ApiError) -> io::Error {
    io::Error::other(error.to_string())
}

fn parse_file_kind(raw: &str) -> Result<FileKind, String> {
    raw.parse()
}

fn read_upload(path: &Path, mime_type: Option<String>) -> io::Result<FileUpload> {
    let bytes = std::fs::read(path)
        .map_err(|error| io::Error::other(format!("read '{}': {error}", path.display())))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path must name a file"))?
        .to_owned();
    let mime_type = mime_type.unwrap_or_else(|| guess_mime_type(path));
    Ok(FileUpload {
        file_name,
        mime_type,
        bytes,
    })
}

fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_owned()
}

fn describe_status(status: RegistrationStatus) -> String {
    match status {
        RegistrationStatus::Open => "open".to_owned(),
        RegistrationStatus::NotYet { opens_at } => format!("opens {}", opens_at.to_rfc3339()),
        RegistrationStatus::Closed => "closed".to_owned(),
        RegistrationStatus::Full => "full".to_owned(),
    }
}

fn write_event_list(out: &mut impl Write, state: &ListState<ExtendedEvent>) -> io::Result<()> {
    for item in &state.items {
        let event = &item.event;
        let cap = event
            .max_participants
            .map_or_else(|| "-".to_owned(), |cap| cap.to_string());
        writeln!(
            out,
            "{}\t{}\t{}..{}\t{}/{}",
            event.id, event.title, event.start_date, event.end_date, event.participants, cap
        )?;
    }
    writeln!(
        out,
        "shown={} more={}",
        state.items.len(),
        if state.exhausted { "no" } else { "yes" }
    )
}

fn write_event(out: &mut impl Write, item: &ExtendedEvent) -> io::Result<()> {
    let event = &item.event;
    writeln!(out, "id={}", event.id)?;
    writeln!(out, "title={}", event.title)?;
    writeln!(out, "dates={}..{}", event.start_date, event.end_date)?;
    if let Some(place) = &event.place {
        writeln!(out, "place={place}")?;
    }
    let tags: Vec<&str> = event.tags.iter().map(String::as_str).collect();
    writeln!(out, "tags={}", tags.join(","))?;
    writeln!(out, "participants={}", event.participants)?;
    writeln!(out, "friends_going={}", item.friends_going)?;
    writeln!(out, "participation={:?}", item.participation)
}

fn write_profile(out: &mut impl Write, profile: &Profile) -> io::Result<()> {
    writeln!(out, "id={}", profile.id)?;
    writeln!(out, "name={}", profile.display_name())?;
    writeln!(out, "birth_date={}", profile.birth_date)?;
    writeln!(out, "university={}", profile.university)?;
    if let Some(bio) = &profile.bio {
        writeln!(out, "bio={bio}")?;
    }
    Ok(())
}

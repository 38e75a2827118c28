//! MCP tool and resource definitions for the notes vault.

use chrono::{Local, NaiveDate};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, ErrorData, ListResourcesResult, PaginatedRequestParam, RawResource,
        ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
        ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router, ServerHandler,
};
use serde::Deserialize;

use orb_core::error::VaultError;
use orb_core::org;
use orb_vault::{InitOutcome, Vault};

/// URI of the daily-note resource.
pub const TODAY_URI: &str = "notes://today";

/// MCP server exposing the notes vault.
///
/// Every tool returns a string: the requested content or list on
/// success, a prefixed `Error:`/`Warning:` message otherwise. Callers
/// distinguish outcomes by message content; there is no separate status
/// channel.
#[derive(Debug, Clone)]
pub struct NotesService {
    vault: Vault,
    tool_router: ToolRouter<Self>,
}

impl NotesService {
    pub fn new(vault: Vault) -> Self {
        Self {
            vault,
            tool_router: Self::tool_router(),
        }
    }

    fn daily_note_text(&self) -> String {
        // "Today" is the local clock at call time, never cached.
        let today = Local::now().date_naive();
        match self.vault.daily_note(today) {
            Ok(content) => content,
            Err(_) => format!(
                "No journal entry for today ({}).",
                today.format(org::DATE_FORMAT)
            ),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, org::DATE_FORMAT)
        .map_err(|_| format!("Error: invalid date '{raw}', expected YYYY-MM-DD."))
}

// === Tool request types ===

/// Request for filename search.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Substring to match against note filenames; org-roam ID prefixes
    /// are ignored
    pub query: String,
}

/// Request to read a note by path.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadNoteRequest {
    /// Path of the note relative to the notes root
    pub relative_path: String,
}

/// Request to initialize a journal day file.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InitDayRequest {
    /// Day to initialize, as YYYY-MM-DD
    pub date: String,
    /// Title for the day file (defaults to the date)
    pub title: Option<String>,
}

/// Request to append a journal entry.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddEntryRequest {
    /// Day to append to, as YYYY-MM-DD
    pub date: String,
    /// Entry body text
    pub body: String,
    /// Optional entry title
    pub title: Option<String>,
}

/// Request to edit a journal day file.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EditEntryRequest {
    /// Day to edit, as YYYY-MM-DD
    pub date: String,
    /// Exact text to replace; every occurrence is replaced
    pub old_text: String,
    /// Replacement text
    pub new_text: String,
}

#[tool_router]
impl NotesService {
    /// Search note filenames, ignoring org-roam ID prefixes.
    #[tool(
        description = "Search notes by filename substring, ignoring org-roam ID prefixes; returns root-relative paths"
    )]
    fn search_notes(&self, Parameters(req): Parameters<SearchRequest>) -> String {
        let results = self.vault.search(&req.query);
        serde_json::to_string_pretty(&results).unwrap_or_else(|_| "[]".to_string())
    }

    /// Read a note by root-relative path.
    #[tool(description = "Read the content of a note using its path relative to the notes root")]
    fn read_note(&self, Parameters(req): Parameters<ReadNoteRequest>) -> String {
        match self.vault.read_note(&req.relative_path) {
            Ok(content) => content,
            Err(VaultError::AccessDenied { .. }) => {
                "Error: Access denied (path out of bounds).".to_string()
            }
            Err(e) => format!("Reading error: {e}"),
        }
    }

    /// Create a journal day file with header metadata.
    #[tool(description = "Create the journal file for a specific day with header metadata")]
    fn initialize_journal_day(&self, Parameters(req): Parameters<InitDayRequest>) -> String {
        let date = match parse_date(&req.date) {
            Ok(d) => d,
            Err(msg) => return msg,
        };
        match self.vault.init_day(date, req.title.as_deref()) {
            Ok(InitOutcome::Created(file)) => format!("File created: {file}"),
            Ok(InitOutcome::AlreadyInitialized) => format!(
                "Warning: The journal for {} is already initialized.",
                req.date
            ),
            Err(e) => format!("Error: {e}"),
        }
    }

    /// Append a timestamped entry to a day's journal.
    #[tool(
        description = "Add a timestamped entry to the day's journal, creating the file if needed"
    )]
    fn add_journal_entry(&self, Parameters(req): Parameters<AddEntryRequest>) -> String {
        let date = match parse_date(&req.date) {
            Ok(d) => d,
            Err(msg) => return msg,
        };
        match self.vault.append_entry(date, &req.body, req.title.as_deref()) {
            Ok(timestamp) => format!("Entry recorded with active timestamp: {timestamp}"),
            Err(e) => format!("Error: {e}"),
        }
    }

    /// Replace text within a day's journal.
    #[tool(
        description = "Replace text within a journal day file. Simple literal replacement of every occurrence; use with caution"
    )]
    fn edit_journal_entry(&self, Parameters(req): Parameters<EditEntryRequest>) -> String {
        let date = match parse_date(&req.date) {
            Ok(d) => d,
            Err(msg) => return msg,
        };
        match self.vault.edit_entry(date, &req.old_text, &req.new_text) {
            Ok(()) => "Journal entry updated successfully.".to_string(),
            Err(VaultError::NotFound { file }) => format!("Error: The file {file} does not exist."),
            Err(VaultError::TextNotFound) => {
                "Error: Original text not found. Update failed.".to_string()
            }
            Err(e) => format!("Error: {e}"),
        }
    }
}

#[tool_handler]
impl ServerHandler for NotesService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Org notes server. Search notes by filename, read notes by relative path, \
                 and manage journal day files: initialize a day, append timestamped \
                 entries, and edit entry text. Today's journal is available as the \
                 notes://today resource."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: vec![RawResource::new(TODAY_URI, "Today's journal").no_annotation()],
            next_cursor: None,
            meta: Default::default(),
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri, .. }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        if uri != TODAY_URI {
            return Err(ErrorData::resource_not_found(
                "resource not found",
                Some(serde_json::json!({ "uri": uri })),
            ));
        }
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(self.daily_note_text(), uri)],
        })
    }
}

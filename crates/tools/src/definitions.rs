//! Tool Definitions
//!
//! One definition per tool the model may call. Query tools read the user's
//! records; terminal tools end the turn with a structured proposal and are
//! never executed here.

use std::collections::HashMap;

use taskweave_llm::{ParameterSchema, ToolDefinition};

/// Read query against the user's tasks
pub const QUERY_TASKS: &str = "query_tasks";
/// Read query against the user's notes
pub const QUERY_NOTES: &str = "query_notes";
/// Read query against the user's projects
pub const QUERY_PROJECTS: &str = "query_projects";
/// Read query against the user's files
pub const QUERY_FILES: &str = "query_files";
/// Terminal tool carrying proposed create/update/delete operations
pub const PROPOSE_OPERATIONS: &str = "propose_operations";
/// Terminal tool carrying clarifying questions back to the user
pub const ASK_QUESTIONS: &str = "ask_questions";

/// Whether a tool name is one of the read-only query tools
pub fn is_query_tool(name: &str) -> bool {
    matches!(name, QUERY_TASKS | QUERY_NOTES | QUERY_PROJECTS | QUERY_FILES)
}

/// Whether a tool name ends the turn with a structured proposal
pub fn is_terminal_tool(name: &str) -> bool {
    matches!(name, PROPOSE_OPERATIONS | ASK_QUESTIONS)
}

/// All tool definitions, query tools first
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        query_tasks_tool(),
        query_notes_tool(),
        query_projects_tool(),
        query_files_tool(),
        propose_operations_tool(),
        ask_questions_tool(),
    ]
}

/// query_tasks tool definition
pub fn query_tasks_tool() -> ToolDefinition {
    let mut properties = HashMap::new();
    properties.insert(
        "status".to_string(),
        ParameterSchema::string_enum(
            Some("Filter by task status"),
            &["todo", "in_progress", "done"],
        ),
    );
    properties.insert(
        "project_id".to_string(),
        ParameterSchema::string(Some("Only tasks belonging to this project")),
    );
    properties.insert(
        "search".to_string(),
        ParameterSchema::string(Some("Substring to match against task titles")),
    );
    properties.insert(
        "limit".to_string(),
        ParameterSchema::integer(Some("Maximum number of tasks to return (default 20, max 50)")),
    );

    ToolDefinition {
        name: QUERY_TASKS.to_string(),
        description: "Look up the user's tasks. Read-only. Supports filtering by status, project and title substring.".to_string(),
        input_schema: ParameterSchema::object(
            Some("Task query parameters"),
            properties,
            vec![],
        ),
    }
}

/// query_notes tool definition
pub fn query_notes_tool() -> ToolDefinition {
    let mut properties = HashMap::new();
    properties.insert(
        "project_id".to_string(),
        ParameterSchema::string(Some("Only notes belonging to this project")),
    );
    properties.insert(
        "search".to_string(),
        ParameterSchema::string(Some("Substring to match against note titles and bodies")),
    );
    properties.insert(
        "limit".to_string(),
        ParameterSchema::integer(Some("Maximum number of notes to return (default 20, max 50)")),
    );

    ToolDefinition {
        name: QUERY_NOTES.to_string(),
        description: "Look up the user's notes. Read-only.".to_string(),
        input_schema: ParameterSchema::object(
            Some("Note query parameters"),
            properties,
            vec![],
        ),
    }
}

/// query_projects tool definition
pub fn query_projects_tool() -> ToolDefinition {
    let mut properties = HashMap::new();
    properties.insert(
        "status".to_string(),
        ParameterSchema::string_enum(
            Some("Filter by project status"),
            &["active", "archived"],
        ),
    );
    properties.insert(
        "search".to_string(),
        ParameterSchema::string(Some("Substring to match against project names")),
    );
    properties.insert(
        "limit".to_string(),
        ParameterSchema::integer(Some("Maximum number of projects to return (default 20, max 50)")),
    );

    ToolDefinition {
        name: QUERY_PROJECTS.to_string(),
        description: "Look up the user's projects. Read-only.".to_string(),
        input_schema: ParameterSchema::object(
            Some("Project query parameters"),
            properties,
            vec![],
        ),
    }
}

/// query_files tool definition
pub fn query_files_tool() -> ToolDefinition {
    let mut properties = HashMap::new();
    properties.insert(
        "project_id".to_string(),
        ParameterSchema::string(Some("Only files attached to this project")),
    );
    properties.insert(
        "mime_type".to_string(),
        ParameterSchema::string(Some("MIME type prefix, e.g. \"image/\"")),
    );
    properties.insert(
        "limit".to_string(),
        ParameterSchema::integer(Some("Maximum number of files to return (default 20, max 50)")),
    );

    ToolDefinition {
        name: QUERY_FILES.to_string(),
        description: "Look up the user's uploaded files. Read-only.".to_string(),
        input_schema: ParameterSchema::object(
            Some("File query parameters"),
            properties,
            vec![],
        ),
    }
}

/// propose_operations terminal tool definition
pub fn propose_operations_tool() -> ToolDefinition {
    let mut op_properties = HashMap::new();
    op_properties.insert(
        "kind".to_string(),
        ParameterSchema::string_enum(
            Some("The kind of change being proposed"),
            &["create", "update", "delete"],
        ),
    );
    op_properties.insert(
        "entity_type".to_string(),
        ParameterSchema::string_enum(
            Some("The kind of record the operation applies to"),
            &["task", "note", "project"],
        ),
    );
    op_properties.insert(
        "id".to_string(),
        ParameterSchema::string(Some("Id of the record to update or delete")),
    );
    op_properties.insert(
        "data".to_string(),
        ParameterSchema::object(
            Some("Full record data for a create"),
            HashMap::new(),
            vec![],
        ),
    );
    op_properties.insert(
        "changes".to_string(),
        ParameterSchema::object(
            Some("Fields to change for an update"),
            HashMap::new(),
            vec![],
        ),
    );
    op_properties.insert(
        "reason".to_string(),
        ParameterSchema::string(Some("Short explanation shown to the user")),
    );

    let operation = ParameterSchema::object(
        Some("One proposed operation"),
        op_properties,
        vec!["kind".to_string(), "entity_type".to_string()],
    );

    let mut properties = HashMap::new();
    properties.insert(
        "operations".to_string(),
        ParameterSchema::array(Some("The operations to propose"), operation),
    );

    ToolDefinition {
        name: PROPOSE_OPERATIONS.to_string(),
        description: "Propose create, update or delete operations on the user's tasks, notes or projects. The user confirms before anything is applied. Use this when the user asked for a change.".to_string(),
        input_schema: ParameterSchema::object(
            Some("Proposed operations"),
            properties,
            vec!["operations".to_string()],
        ),
    }
}

/// ask_questions terminal tool definition
pub fn ask_questions_tool() -> ToolDefinition {
    let mut q_properties = HashMap::new();
    q_properties.insert(
        "prompt".to_string(),
        ParameterSchema::string(Some("The question to ask the user")),
    );
    q_properties.insert(
        "options".to_string(),
        ParameterSchema::array(
            Some("Suggested answers the user can pick from"),
            ParameterSchema::string(None),
        ),
    );

    let question = ParameterSchema::object(
        Some("One clarifying question"),
        q_properties,
        vec!["prompt".to_string()],
    );

    let mut properties = HashMap::new();
    properties.insert(
        "questions".to_string(),
        ParameterSchema::array(Some("The questions to ask"), question),
    );

    ToolDefinition {
        name: ASK_QUESTIONS.to_string(),
        description: "Ask the user one or more clarifying questions when their request is ambiguous or missing details needed to proceed.".to_string(),
        input_schema: ParameterSchema::object(
            Some("Clarifying questions"),
            properties,
            vec!["questions".to_string()],
        ),
    }
}

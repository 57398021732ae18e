//! Mode Policy
//!
//! Maps the conversation mode to the tool set and model parameters for a
//! run. Pure functions, no state, no I/O.

use serde::{Deserialize, Serialize};
use taskweave_llm::ToolDefinition;
use taskweave_tools::definitions::{
    ask_questions_tool, propose_operations_tool, query_files_tool, query_notes_tool,
    query_projects_tool, query_tasks_tool,
};

/// How the assistant should behave for this request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Conversational; favors clarifying questions
    Chat,
    /// Change-oriented; favors proposing operations
    Action,
}

/// Model invocation parameters for a mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Tool set for a mode. Query tools are available in both; the terminal
/// tool the mode favors is listed first among the terminals.
pub fn tools_for_mode(mode: ChatMode) -> Vec<ToolDefinition> {
    let mut tools = vec![
        query_tasks_tool(),
        query_notes_tool(),
        query_projects_tool(),
        query_files_tool(),
    ];
    match mode {
        ChatMode::Chat => {
            tools.push(ask_questions_tool());
            tools.push(propose_operations_tool());
        }
        ChatMode::Action => {
            tools.push(propose_operations_tool());
            tools.push(ask_questions_tool());
        }
    }
    tools
}

/// Model parameters for a mode
pub fn params_for_mode(mode: ChatMode) -> ModeParams {
    match mode {
        ChatMode::Chat => ModeParams {
            temperature: 0.7,
            max_tokens: 2048,
        },
        ChatMode::Action => ModeParams {
            temperature: 0.2,
            max_tokens: 4096,
        },
    }
}

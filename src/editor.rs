//! Node editor forms and the modal lifecycle.
//!
//! Each form is read from the DOM into one of the structs below, validated
//! here, and turned into the request body for its create endpoint.

use thiserror::Error;

use crate::constants::{TIMER_MAX_SECONDS, TIMER_MIN_SECONDS};
use crate::models::{
    Agent, InputData, LlmData, LlmModelSettings, LoginRequest, Node, NodeKind, Output, OutputType,
    Project, PromptData, TimerData,
};
use crate::models_config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Agent,
    Timer,
    Llm,
    Input,
    Prompt,
}

impl EditorKind {
    /// Node kinds offered by the canvas node panel, in display order.
    pub const NODE_KINDS: [EditorKind; 4] = [EditorKind::Input, EditorKind::Llm, EditorKind::Timer, EditorKind::Prompt];

    pub fn title(&self) -> &'static str {
        match self {
            EditorKind::Agent => "Add Agent",
            EditorKind::Timer => "Timer",
            EditorKind::Llm => "LLM",
            EditorKind::Input => "Input",
            EditorKind::Prompt => "Prompt",
        }
    }

    pub fn panel_tooltip(&self) -> &'static str {
        match self {
            EditorKind::Agent => "Add agent",
            EditorKind::Timer => "Time node",
            EditorKind::Llm => "LLM node",
            EditorKind::Input => "Input node",
            EditorKind::Prompt => "Prompt node",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Open {
        kind: EditorKind,
        /// A create request is in flight; further submits are ignored.
        pending: bool,
        error: Option<String>,
    },
}

impl EditorState {
    pub fn open(kind: EditorKind) -> Self {
        EditorState::Open { kind, pending: false, error: None }
    }

    pub fn kind(&self) -> Option<EditorKind> {
        match self {
            EditorState::Open { kind, .. } => Some(*kind),
            EditorState::Closed => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EditorState::Open { pending: true, .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EditorState::Open { error, .. } => error.as_deref(),
            EditorState::Closed => None,
        }
    }

    /// Keep the modal open with `error` shown and the save button enabled.
    pub fn fail(&mut self, error: String) {
        if let EditorState::Open { kind, .. } = self {
            *self = EditorState::Open { kind: *kind, pending: false, error: Some(error) };
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("time must be a whole number between {min} and {max} seconds")]
    TimeOutOfRange { min: u32, max: u32 },
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),
    #[error("model '{model}' is not offered by {provider}")]
    UnknownModel { provider: String, model: String },
    #[error("temperature must be between 0 and 1")]
    TemperatureOutOfRange,
    #[error("unknown output type '{0}'")]
    UnknownOutputType(String),
    #[error("no {0} loaded yet")]
    MissingContext(&'static str),
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn output(name: &str, output_type: &str) -> Result<Output, FormError> {
    let name = required(name, "output name")?;
    let output_type = match output_type.trim() {
        "" => OutputType::Str,
        other => OutputType::parse(other).ok_or_else(|| FormError::UnknownOutputType(other.to_string()))?,
    };
    Ok(Output { name, output_type })
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentForm {
    pub name: String,
    pub description: String,
}

impl AgentForm {
    pub fn to_request(&self, project_id: &str) -> Result<Agent, FormError> {
        Ok(Agent::new_for_project(
            required(&self.name, "agent name")?,
            optional(&self.description),
            project_id.to_string(),
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerForm {
    /// Raw value of the number input.
    pub time: String,
}

impl TimerForm {
    pub fn to_request(&self, agent_id: &str) -> Result<Node, FormError> {
        let range = FormError::TimeOutOfRange { min: TIMER_MIN_SECONDS, max: TIMER_MAX_SECONDS };
        let time = self.time.trim().parse::<u32>().map_err(|_| range.clone())?;
        if !(TIMER_MIN_SECONDS..=TIMER_MAX_SECONDS).contains(&time) {
            return Err(range);
        }
        Ok(Node::new_for_agent(agent_id.to_string(), None, NodeKind::Timer(TimerData { time })))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmForm {
    pub name: String,
    pub description: String,
    pub provider: String,
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub output_name: String,
    pub output_type: String,
}

impl Default for LlmForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            provider: String::new(),
            model: String::new(),
            prompt: String::new(),
            temperature: crate::constants::DEFAULT_TEMPERATURE,
            output_name: String::new(),
            output_type: String::new(),
        }
    }
}

impl LlmForm {
    pub fn to_request(&self, agent_id: &str) -> Result<Node, FormError> {
        let name = required(&self.name, "LLM name")?;
        let provider = required(&self.provider, "provider")?;
        let model = required(&self.model, "model")?;

        let models = models_config::models_for(&provider).ok_or_else(|| FormError::UnknownProvider(provider.clone()))?;
        if !models.contains(&model.as_str()) {
            return Err(FormError::UnknownModel { provider, model });
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(FormError::TemperatureOutOfRange);
        }
        let output = output(&self.output_name, &self.output_type)?;

        let mut node = Node::new_for_agent(
            agent_id.to_string(),
            Some(name),
            NodeKind::Llm(LlmData {
                model: LlmModelSettings { provider, name: model, temperature: self.temperature },
                prompt: optional(&self.prompt),
                output: Some(output),
            }),
        );
        node.description = optional(&self.description);
        Ok(node)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputForm {
    pub name: String,
    pub description: String,
    pub value: String,
    pub output_name: String,
    pub output_type: String,
    pub target_id: String,
}

impl InputForm {
    pub fn to_request(&self, agent_id: &str) -> Result<Node, FormError> {
        let name = required(&self.name, "input name")?;
        let output = output(&self.output_name, &self.output_type)?;

        let mut node = Node::new_for_agent(
            agent_id.to_string(),
            Some(name),
            NodeKind::Input(InputData { value: self.value.clone(), output: Some(output) }),
        );
        node.description = optional(&self.description);
        node.target_id = optional(&self.target_id);
        Ok(node)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptForm {
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub version: String,
    /// Comma separated state keys the template reads.
    pub inputs: String,
    pub output_name: String,
    pub output_type: String,
}

impl PromptForm {
    pub fn to_request(&self, agent_id: &str) -> Result<Node, FormError> {
        let name = required(&self.name, "prompt name")?;
        let prompt = required(&self.prompt, "prompt text")?;
        let version = required(&self.version, "version")?;
        let output = output(&self.output_name, &self.output_type)?;
        let inputs = self
            .inputs
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let mut node = Node::new_for_agent(
            agent_id.to_string(),
            Some(name),
            NodeKind::Prompt(PromptData { prompt, version, inputs, output: Some(output) }),
        );
        node.description = optional(&self.description);
        Ok(node)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
}

impl ProjectForm {
    pub fn to_request(&self) -> Result<Project, FormError> {
        Ok(Project {
            id: None,
            name: Some(required(&self.name, "project name")?),
            description: optional(&self.description),
            agents: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> Result<LoginRequest, FormError> {
        let name = required(&self.name, "project name")?;
        if self.password.is_empty() {
            return Err(FormError::Required("password"));
        }
        Ok(LoginRequest { name, password: self.password.clone() })
    }
}

/// Values collected from an open editor on save.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorSubmission {
    Agent(AgentForm),
    Timer(TimerForm),
    Llm(LlmForm),
    Input(InputForm),
    Prompt(PromptForm),
}

impl EditorSubmission {
    pub fn kind(&self) -> EditorKind {
        match self {
            EditorSubmission::Agent(_) => EditorKind::Agent,
            EditorSubmission::Timer(_) => EditorKind::Timer,
            EditorSubmission::Llm(_) => EditorKind::Llm,
            EditorSubmission::Input(_) => EditorKind::Input,
            EditorSubmission::Prompt(_) => EditorKind::Prompt,
        }
    }
}

/// A validated request ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateRequest {
    Agent(Agent),
    Node(Node),
}

/// Validate `submission` against the currently loaded project and agent.
pub fn build_request(
    submission: &EditorSubmission,
    project: Option<&Project>,
    agent: Option<&Agent>,
) -> Result<CreateRequest, FormError> {
    let agent_id = || {
        agent
            .and_then(|a| a.id.as_deref())
            .ok_or(FormError::MissingContext("agent"))
    };

    match submission {
        EditorSubmission::Agent(form) => {
            let project_id = project
                .and_then(|p| p.id.as_deref())
                .ok_or(FormError::MissingContext("project"))?;
            form.to_request(project_id).map(CreateRequest::Agent)
        }
        EditorSubmission::Timer(form) => form.to_request(agent_id()?).map(CreateRequest::Node),
        EditorSubmission::Llm(form) => form.to_request(agent_id()?).map(CreateRequest::Node),
        EditorSubmission::Input(form) => form.to_request(agent_id()?).map(CreateRequest::Node),
        EditorSubmission::Prompt(form) => form.to_request(agent_id()?).map(CreateRequest::Node),
    }
}

use crate::agent::HousingSearchAgent;
use crate::interpreter::{interpret_partial, PartialCriteria};
use tracing::info;

const GREETING: &str = "Hi! I can help you find a rental home in Denmark. To get started, tell me:\n\
    - the location (e.g. Copenhagen, Aarhus)\n\
    - the number of rooms you need\n\
    - your maximum monthly rent in DKK";

/// Who is answering the user right now
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationState {
    /// Collecting location, room count and rent ceiling
    Intake(PartialCriteria),
    /// Every turn is a search query
    Searching,
}

/// Two-state dialogue: intake hands off to search once the required fields are known
pub struct Conversation<'a> {
    agent: &'a HousingSearchAgent,
    state: ConversationState,
}

impl<'a> Conversation<'a> {
    pub fn new(agent: &'a HousingSearchAgent) -> Self {
        Self {
            agent,
            state: ConversationState::Intake(PartialCriteria::default()),
        }
    }

    pub fn greeting() -> &'static str {
        GREETING
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Answer one user turn
    pub async fn respond(&mut self, input: &str) -> String {
        match &mut self.state {
            ConversationState::Searching => self.agent.search_housing(input).await,
            ConversationState::Intake(collected) => {
                let update = interpret_partial(self.agent.extractor(), input).await;
                collected.merge(update);

                if !collected.is_complete() {
                    return ask_for(&collected.missing());
                }

                match collected.to_criteria() {
                    Ok(criteria) => {
                        info!("Intake complete, handing off to search");
                        self.state = ConversationState::Searching;
                        self.agent.search_with_criteria(criteria).await
                    }
                    Err(e) => e.to_string(),
                }
            }
        }
    }
}

fn ask_for(missing: &[&str]) -> String {
    let list = match missing {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    };
    format!("Thanks! Could you also tell me the {}?", list)
}

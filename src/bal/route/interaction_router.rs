use crate::dal::model::{
    interaction_request::{InteractionRequest, InteractionType},
    interaction_response::InteractionResponse,
};

use super::component_router::ComponentRouter;

#[derive(Debug)]
pub enum RouteOutcome {
    Reply(InteractionResponse),
    UnknownType(InteractionType),
}

pub struct InteractionRouter {
    component_router: ComponentRouter,
}

impl InteractionRouter {
    pub fn new(component_router: ComponentRouter) -> Self {
        Self { component_router }
    }

    pub async fn route(&self, interaction: &InteractionRequest) -> RouteOutcome {
        match interaction.interaction_type {
            InteractionType::Ping => RouteOutcome::Reply(InteractionResponse::pong()),

            InteractionType::MessageComponent => {
                RouteOutcome::Reply(self.component_router.handle_component(interaction).await)
            }

            other => RouteOutcome::UnknownType(other),
        }
    }
}

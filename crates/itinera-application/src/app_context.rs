//! Wires the key-value repositories, the session and the travel agent.

use crate::account_usecase::AccountUseCase;
use crate::session_context::SessionContext;
use crate::trip_planner_usecase::TripPlannerUseCase;
use itinera_core::ai::TextGenerator;
use itinera_core::chat::ChatRepository;
use itinera_core::itinerary::ItineraryRepository;
use itinera_core::storage::KeyValueStore;
use itinera_infrastructure::{
    KvChatRepository, KvItineraryRepository, KvSessionRepository, KvUserRepository,
};
use itinera_interaction::TravelAgent;
use std::sync::Arc;

/// Everything a front end needs, built over one store.
pub struct AppContext {
    pub session: Arc<SessionContext>,
    pub accounts: AccountUseCase,
    pub planner: TripPlannerUseCase,
}

impl AppContext {
    pub fn new(store: Arc<dyn KeyValueStore>, generator: Arc<dyn TextGenerator>) -> Self {
        tracing::debug!(
            generator = generator.name(),
            available = store.is_available(),
            "Building application context"
        );

        let session = Arc::new(SessionContext::restore(Arc::new(KvSessionRepository::new(
            store.clone(),
        ))));
        let users = Arc::new(KvUserRepository::new(store.clone()));
        let chats: Arc<dyn ChatRepository> = Arc::new(KvChatRepository::new(store.clone()));
        let itineraries: Arc<dyn ItineraryRepository> =
            Arc::new(KvItineraryRepository::new(store, chats.clone()));

        Self {
            accounts: AccountUseCase::new(users, session.clone()),
            planner: TripPlannerUseCase::new(
                TravelAgent::new(generator),
                itineraries,
                chats,
                session.clone(),
            ),
            session,
        }
    }
}

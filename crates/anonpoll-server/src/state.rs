use std::sync::Arc;

use anonpoll_application::SurveyUseCase;

use crate::render::PageRenderer;

pub struct AppState {
    pub survey: SurveyUseCase,
    pub pages: PageRenderer,
}

impl AppState {
    pub fn new(survey: SurveyUseCase) -> Result<Arc<Self>, minijinja::Error> {
        Ok(Arc::new(Self {
            survey,
            pages: PageRenderer::new()?,
        }))
    }
}

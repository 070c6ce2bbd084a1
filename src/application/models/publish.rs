use serde::{Deserialize, Serialize};

/// Body of `POST /{ig-user-id}/media`
#[derive(Debug, Serialize)]
pub struct ContainerRequest<'a> {
    pub image_url: &'a str,
    pub caption: &'a str,
    pub access_token: &'a str,
}

/// Body of `POST /{ig-user-id}/media_publish`
#[derive(Debug, Serialize)]
pub struct PublishRequest<'a> {
    pub creation_id: &'a str,
    pub access_token: &'a str,
}

/// Response of both publish steps.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResource {
    pub id: Option<String>,
}

impl CreatedResource {
    pub fn created_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

use serde::Deserialize;

// entry
//  ├── request
//  │    ├── url
//  │    ├── method
//  │    └── postData
//  │         └── text
//  └── response
//       └── content
//            ├── mimeType
//            ├── text
//            └── encoding

#[derive(Debug, Default, Deserialize)]
pub struct HarEntry {
    #[serde(default)]
    pub request: HarRequest,
    #[serde(default)]
    pub response: HarResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarRequest {
    pub url: Option<String>,
    pub method: Option<String>,
    #[serde(rename = "postData")]
    pub post_data: Option<PostData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostData {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarResponse {
    #[serde(default)]
    pub content: Content,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub text: Option<String>,
    pub encoding: Option<String>,
}

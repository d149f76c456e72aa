use crate::logger::interface::Logger;
use crate::prediction_client::form::{FormField, FormPayload};
use crate::prediction_client::interface::{PredictionClient, SubmitError};
use crate::prediction_client::response::PredictionResponse;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::Url;
use std::sync::Arc;

pub struct PredictionClientHttp {
    client: reqwest::blocking::Client,
    endpoint: Url,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictionClientHttp {
    pub fn new(
        endpoint: Url,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = reqwest::blocking::Client::builder().build()?;

        Ok(Self {
            client,
            endpoint,
            logger: logger.with_namespace("prediction_client").with_namespace("http"),
        })
    }
}

impl PredictionClient for PredictionClientHttp {
    fn submit(&self, payload: FormPayload) -> Result<PredictionResponse, SubmitError> {
        let form = to_multipart(payload)?;

        let _ = self.logger.info(&format!("POST {}", self.endpoint));

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()?;

        let status = response.status();
        let body = response.bytes()?;

        let _ = self
            .logger
            .info(&format!("{} ({} bytes)", status, body.len()));

        Ok(PredictionResponse::decode(&body)?)
    }
}

fn to_multipart(payload: FormPayload) -> Result<Form, SubmitError> {
    let mut form = Form::new();

    for field in payload.fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File {
                name,
                file_name,
                mime,
                bytes,
            } => form.part(name, Part::bytes(bytes).file_name(file_name).mime_str(&mime)?),
        };
    }

    Ok(form)
}

use crate::capture_client::upload_form::UploadForm;
use crate::prediction_client::form::{FormField, FormPayload};
use crate::prediction_client::interface::SubmitError;
use crate::prediction_client::response::Outcome;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CameraState {
    #[default]
    Requesting,
    Live,
    Unavailable,
}

/// The picture that went out with the last submission.
#[derive(Clone, PartialEq)]
pub struct InputImage {
    pub caption: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for InputImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InputImage({:?}, {} bytes)", self.caption, self.bytes.len())
    }
}

/// Everything the adapter shows. `result_text` and `preview` are the two
/// display regions; `confidence` feeds the optional bar under the result and
/// `input_image` the picture beside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub camera: CameraState,
    pub result_text: Option<String>,
    pub confidence: Option<f64>,
    pub preview: Option<String>,
    pub input_image: Option<InputImage>,
}

pub const CAPTURED_CAPTION: &str = "Captured Image";
pub const UPLOADED_CAPTION: &str = "Uploaded Image";

#[derive(Debug)]
pub enum Msg {
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    CaptureClicked,
    SnapshotDone(Result<FormPayload, SubmitError>),
    UploadSubmitted(UploadForm),
    UploadPrepared(Result<FormPayload, SubmitError>),
    SubmitDone(Result<Outcome, SubmitError>),
    Shutdown,
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::SnapshotDone(Ok(payload)) => format!("SnapshotDone(Ok({}))", describe(payload)),
            Msg::UploadPrepared(Ok(payload)) => {
                format!("UploadPrepared(Ok({}))", describe(payload))
            }
            msg => format!("{:?}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartCamera,
    CaptureSnapshot,
    PrepareUpload { form: UploadForm },
    Submit { payload: FormPayload },
    ReportDiagnostic { message: String },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Submit { payload } => format!("Submit {{ {} }}", describe(payload)),
            effect => format!("{:?}", effect),
        }
    }
}

fn describe(payload: &FormPayload) -> String {
    let fields: Vec<String> = payload
        .fields
        .iter()
        .map(|field| match field {
            FormField::Text { name, .. } => name.clone(),
            FormField::File {
                name,
                file_name,
                bytes,
                ..
            } => format!("{}={:?} ({} bytes)", name, file_name, bytes.len()),
        })
        .collect();
    format!("[{}]", fields.join(", "))
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![Effect::StartCamera])
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::CameraStartDone(Ok(())) => (
            Model {
                camera: CameraState::Live,
                ..model
            },
            vec![],
        ),
        // No user-facing path: the failure only reaches the diagnostic channel.
        Msg::CameraStartDone(Err(e)) => (
            Model {
                camera: CameraState::Unavailable,
                ..model
            },
            vec![Effect::ReportDiagnostic {
                message: format!("Webcam error: {}", e),
            }],
        ),

        Msg::CaptureClicked => (model, vec![Effect::CaptureSnapshot]),
        Msg::SnapshotDone(Ok(payload)) => submit(model, payload, CAPTURED_CAPTION),
        Msg::SnapshotDone(Err(e)) => (show_error(model, &e.to_string()), vec![]),

        Msg::UploadSubmitted(form) => (model, vec![Effect::PrepareUpload { form }]),
        Msg::UploadPrepared(Ok(payload)) => submit(model, payload, UPLOADED_CAPTION),
        Msg::UploadPrepared(Err(e)) => (show_error(model, &e.to_string()), vec![]),

        Msg::SubmitDone(Ok(outcome)) => (show_outcome(model, outcome), vec![]),
        Msg::SubmitDone(Err(e)) => (show_error(model, &e.to_string()), vec![]),

        Msg::Shutdown => (model, vec![]),
    }
}

fn submit(model: Model, payload: FormPayload, caption: &str) -> (Model, Vec<Effect>) {
    let sent = payload.fields.iter().find_map(|field| match field {
        FormField::File { bytes, .. } if !bytes.is_empty() => Some(InputImage {
            caption: caption.to_string(),
            bytes: bytes.clone(),
        }),
        _ => None,
    });

    (
        Model {
            // An empty file part has nothing to show.
            input_image: sent.or(model.input_image),
            ..model
        },
        vec![Effect::Submit { payload }],
    )
}

fn show_outcome(model: Model, outcome: Outcome) -> Model {
    let result_text = Some(outcome.result_text());

    match outcome {
        Outcome::Prediction {
            score, image_path, ..
        } => Model {
            result_text,
            confidence: score,
            // An absent image_path leaves the last preview in place.
            preview: image_path.or(model.preview),
            ..model
        },
        Outcome::Rejected(_) => Model {
            result_text,
            confidence: None,
            ..model
        },
    }
}

fn show_error(model: Model, message: &str) -> Model {
    Model {
        result_text: Some(format!("Error: {}", message)),
        confidence: None,
        ..model
    }
}

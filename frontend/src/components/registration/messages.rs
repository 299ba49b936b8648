use common::model::registration::{Field, RegistrationRecord, WardField};
use common::validation::FieldPath;
use common::wards::WardId;

pub enum Msg {
    UpdateField(Field, String),
    BlurField(FieldPath),
    UpdateWard(WardId, WardField, String),
    AddWard,
    RemoveWard(WardId),
    OpenFileDialog,
    ImageSelected(web_sys::File),
    ClearImage,
    Submit,
    SubmitSucceeded(RegistrationRecord),
    SubmitFailed(String),
}

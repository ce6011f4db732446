use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of a successful delete.
#[derive(Serialize, Debug)]
pub struct Ack {
    pub ok: bool,
}

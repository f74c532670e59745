use mgmt_derive::mgmt_error;

#[mgmt_error]
pub enum DemoError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
}

fn main() {}

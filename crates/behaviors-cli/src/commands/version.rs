use behaviors_core::version::version_string;
use behaviors_core::VERSION;
use miette::Result;

pub fn run(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "version": VERSION }));
    } else {
        println!("{}", version_string());
    }
    Ok(())
}

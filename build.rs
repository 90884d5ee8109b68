use std::error::Error;
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    match EmitBuilder::builder()
        .fail_on_error()
        .custom_build_rs(".")
        .all_git()
        .git_describe(true, false, None)
        .emit()
    {
        Ok(_) => {}
        Err(_e) => {
            println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE=unknown");
        }
    }
    Ok(())
}

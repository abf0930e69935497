use anyhow::Result;
use vergen::EmitBuilder;

// Emits VERGEN_GIT_SHA / VERGEN_GIT_COMMIT_DATE for the CLI's debug banner.
// Outside a git checkout vergen falls back to placeholder values.
fn main() -> Result<()> {
    EmitBuilder::builder()
        .git_sha(true)
        .git_commit_date()
        .emit()?;
    Ok(())
}

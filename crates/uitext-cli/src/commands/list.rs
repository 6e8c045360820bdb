use anyhow::Result;
use uitext::TextContext;

pub fn run(ctx: &TextContext) -> Result<()> {
    let families = ctx.families();
    log::debug!("{} families across {} faces", families.len(), ctx.resolver().face_count());
    for family in families {
        println!("{family}");
    }
    Ok(())
}

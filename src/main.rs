//! The htmlsync command-line executable.

fn main() -> anyhow::Result<()> {
    htmlsync::run()
}

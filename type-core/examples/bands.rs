use type_core::{source, style};

fn main() -> type_core::Result<()> {
    type_core::default_log();
    type_core::default_config();

    let source = source::SourceBuilder::new().kind("synthetic").build()?;
    let engine = type_core::EngineBuilder::new().build(source, Box::new(style::LogTypesetter))?;

    let mut frames = type_core::Frames::new(engine)?;

    for frame in frames.iter() {
        frame.lock_info(|info| {
            for amp in info.amplitudes.iter() {
                print!("{:<12}", "#".repeat((*amp / 16.0) as usize));
            }
            println!("{:?}", info.style);
        });

        std::thread::sleep(std::time::Duration::from_millis(30));
    }

    Ok(())
}

use self::{extract::Extract, spritequad::SpriteQuad};

mod extract;
mod spritequad;

pub enum CliRes {
    Ok,
    Err,
}

pub trait Cli {
    fn name(&self) -> &'static str;
    /// `args[1]` selects the module. Module arguments start at `args[2]`.
    fn cli(&self) -> CliRes;
    fn cli_help(&self);
}

pub fn cli() -> CliRes {
    let modules: &[&dyn Cli] = &[&Extract, &SpriteQuad];

    let args: Vec<String> = std::env::args().collect();

    let help = || {
        println!(
            "\
frmx

Available modules:"
        );
        for module in modules {
            println!("{}", module.name());
            module.cli_help();
        }
    };

    if args.len() < 2 {
        help();
        return CliRes::Ok;
    }

    for module in modules {
        if args[1] == module.name() {
            return module.cli();
        }
    }

    help();
    CliRes::Err
}

// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs, Debug, Default)]
/// configsetup - open a config file in .ini format, then replace, add, comment or remove values
pub struct Args {
    /// the file path to parse config
    #[argh(option, short = 'f')]
    pub filename: Option<String>,

    /// show the full detail of changes status
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// remove the option from the default section if no -s <section>; applies before --add
    #[argh(option, short = 'r', default = "String::new()")]
    pub remove: String,

    /// print the value of the option passed in the argument (accepted, currently has no effect)
    #[argh(switch, short = 'p')]
    pub print: bool,

    /// add option=value to the default section if no -s <section>; overwrites an existing option
    #[argh(option, short = 'a', default = "String::new()")]
    pub add: String,

    /// comment lines for the selected option, separated by comma (e.g. "comment one, comment two")
    #[argh(option, short = 'c', default = "String::new()")]
    pub comment: String,

    /// section to apply changes to (default: first section)
    #[argh(option, short = 's', default = "String::new()")]
    pub section: String,

    /// print the resulting file to stdout instead of rewriting it
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file with default values
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

use std::time::Duration;

use gridlife::RuleSet;

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in console mode");
        opts.optflag("", "list-rules", "print the rule catalog and exit");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("f", "fill", "fraction of cells to seed alive", "FRACTION");
        opts.optopt("r", "rule", "catalog name or rule string", "RULE");
        opts.optopt("", "seed", "seed for the random fill", "N");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");
        opts
    }

    /// Parses arguments, returning `Ok(None)` when only help was requested
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, String> {
        let opts = Self::options();
        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .map_err(|e| e.to_string())?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: gridlife [options]"));
            return Ok(None);
        }

        let args = Self { matches };
        args.validate()?;
        Ok(Some(args))
    }
    pub fn from_env() -> Result<Option<Self>, String> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    /// Checks every typed option up front so accessors can fall back to defaults
    fn validate(&self) -> Result<(), String> {
        for name in ["width", "height"] {
            match self.opt_get::<i32>(name)? {
                Some(size) if size <= 0 => {
                    return Err(format!("--{} must be positive, got {}", name, size));
                }
                _ => {}
            }
        }
        // NaN fails the range check
        match self.opt_get::<f64>("fill")? {
            Some(fill) if !(fill > 0.0 && fill <= 1.0) => {
                return Err(format!("--fill must be in (0, 1], got {}", fill));
            }
            _ => {}
        }
        self.opt_get::<u64>("seed")?;
        self.opt_get::<u64>("sleep")?;
        self.opt_get::<u64>("gens")?;
        self.rules()?;
        Ok(())
    }

    fn opt_get<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, String> {
        self.matches
            .opt_get(name)
            .map_err(|_| format!("invalid value for --{}", name))
    }

    fn width(&self) -> Option<i32> {
        self.opt_get("width").ok().flatten()
    }
    fn height(&self) -> Option<i32> {
        self.opt_get("height").ok().flatten()
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn list_rules(&self) -> bool {
        self.matches.opt_present("list-rules")
    }

    pub fn generations(&self) -> Option<u64> {
        self.opt_get("gens").ok().flatten()
    }
    pub fn sleep(&self) -> Option<Duration> {
        match self.opt_get("sleep").ok().flatten() {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        }
    }

    /// The requested grid size, defaulting to the terminal size in console mode
    pub fn grid_size(&self, terminal: Option<(u16, u16)>) -> (i32, i32) {
        let default = match terminal {
            // leave the last row for the report footer
            Some((cols, rows)) => (cols as i32, (rows as i32 - 1).max(1)),
            None => (80, 40),
        };

        (
            self.width().unwrap_or(default.0),
            self.height().unwrap_or(default.1),
        )
    }
    pub fn fill(&self) -> f64 {
        self.opt_get("fill").ok().flatten().unwrap_or(0.3)
    }
    pub fn seed(&self) -> Option<u64> {
        self.opt_get("seed").ok().flatten()
    }

    /// The starting rule set: a catalog name, or a `B3/S23` style string
    pub fn rules(&self) -> Result<RuleSet, String> {
        match self.matches.opt_str("rule") {
            None => Ok(RuleSet::default()),
            Some(text) => RuleSet::named(&text)
                .map(Ok)
                .unwrap_or_else(|| text.parse::<RuleSet>().map_err(|e| e.to_string())),
        }
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

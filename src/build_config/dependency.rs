//! mrbgem dependency descriptors and their `build_config.rb` rendering.

/// Value of one compiler flag category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Appended element by element: `g.<category> << '<value>'`
    List(Vec<String>),
    /// Assigned once: `g.<category> = '<value>'`
    Scalar(String),
}

/// Ordered flag additions applied inside a gem's `do |g| ... end` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerFlags(Vec<(String, FlagValue)>);

impl CompilerFlags {
    /// No flags.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a list category such as `cc.include_paths`.
    #[must_use]
    pub fn append<I, S>(mut self, category: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.push((category.into(), FlagValue::List(values.into_iter().map(Into::into).collect())));
        self
    }

    /// Add a scalar category.
    #[must_use]
    pub fn assign(mut self, category: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((category.into(), FlagValue::Scalar(value.into())));
        self
    }

    /// Whether no category was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.0.iter().map(|(category, value)| (category.as_str(), value))
    }
}

/// A gem fetched from GitHub at a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubGem {
    /// `owner/repository`
    pub repository: String,
    /// Branch to build
    pub branch: String,
    /// Flags for the gem's build block, if any
    pub flags: Option<CompilerFlags>,
}

impl GithubGem {
    /// Gem `repository` at `branch`, without flags.
    pub fn new(repository: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            branch: branch.into(),
            flags: None,
        }
    }

    /// Attach compiler flags.
    #[must_use]
    pub fn with_flags(mut self, flags: CompilerFlags) -> Self {
        self.flags = Some(flags);
        self
    }
}

/// One entry of a gem set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// Gem bundled with mruby, referenced by path (`mrbgems/mruby-math`)
    Name(String),
    /// Gem hosted on GitHub
    Github(GithubGem),
}

impl From<GithubGem> for Dependency {
    fn from(gem: GithubGem) -> Self {
        Self::Github(gem)
    }
}

impl Dependency {
    /// Bundled gem by path.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Render the `conf.gem` directive, preceded by the `tag` line.
    ///
    /// ```rust
    /// use muruby::build_config::{CompilerFlags, Dependency, GithubGem};
    ///
    /// let gem: Dependency = GithubGem::new("pichurriaj/mruby-sdl2", "master")
    ///     .with_flags(CompilerFlags::new().append("linker.libraries", ["SDL2"]))
    ///     .into();
    /// assert_eq!(
    ///     gem.render("#GEN"),
    ///     "#GEN\nconf.gem :github => 'pichurriaj/mruby-sdl2', :branch => 'master' do |g|\n\
    ///      \tg.linker.libraries << 'SDL2'\nend\n"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, tag: &str) -> String {
        let mut out = String::new();
        if !tag.is_empty() {
            out.push_str(tag);
            out.push('\n');
        }

        match self {
            Self::Name(name) => out.push_str(&format!("conf.gem '{name}'\n")),
            Self::Github(gem) => {
                out.push_str(&format!(
                    "conf.gem :github => '{}', :branch => '{}'",
                    gem.repository, gem.branch
                ));
                match &gem.flags {
                    Some(flags) if !flags.is_empty() => {
                        out.push_str(" do |g|\n");
                        for (category, value) in flags.iter() {
                            match value {
                                FlagValue::List(values) => {
                                    for value in values {
                                        out.push_str(&format!("\tg.{category} << '{value}'\n"));
                                    }
                                }
                                FlagValue::Scalar(value) => {
                                    out.push_str(&format!("\tg.{category} = '{value}'\n"));
                                }
                            }
                        }
                        out.push_str("end\n");
                    }
                    _ => out.push('\n'),
                }
            }
        }
        out
    }
}

//! Layered store backing the configuration resolver.

use camino::Utf8PathBuf;

use crate::layer::{OverlayLayer, SourceRank, ValueSlot};
use crate::preconfig::FrozenPreConfig;
use crate::{BootResult, StringList};

use super::directive::DirectiveGroup;
use super::xoptions::implied_fields;
use super::{ConfigOverlay, Directive, HashPycsMode};

/// Slot per configuration field, plus the list-valued sources that are
/// composed rather than replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ConfigStore {
    pub(crate) program_name: ValueSlot<Option<String>>,
    pub(crate) home: ValueSlot<Option<Utf8PathBuf>>,
    pub(crate) prefix: ValueSlot<Option<Utf8PathBuf>>,
    pub(crate) exec_prefix: ValueSlot<Option<Utf8PathBuf>>,
    pub(crate) base_prefix: ValueSlot<Option<Utf8PathBuf>>,
    pub(crate) base_exec_prefix: ValueSlot<Option<Utf8PathBuf>>,
    pub(crate) executable: ValueSlot<Option<Utf8PathBuf>>,
    pub(crate) module_search_paths: ValueSlot<Option<StringList>>,
    pub(crate) pythonpath_env: ValueSlot<Option<String>>,
    pub(crate) pycache_prefix: ValueSlot<Option<Utf8PathBuf>>,
    pub(crate) filesystem_encoding: ValueSlot<Option<String>>,
    pub(crate) filesystem_errors: ValueSlot<Option<String>>,
    pub(crate) stdio_encoding: ValueSlot<Option<String>>,
    pub(crate) stdio_errors: ValueSlot<Option<String>>,
    pub(crate) argv: ValueSlot<Option<StringList>>,
    pub(crate) orig_argv: ValueSlot<Option<StringList>>,
    pub(crate) isolated: ValueSlot<bool>,
    pub(crate) use_environment: ValueSlot<bool>,
    pub(crate) dev_mode: ValueSlot<bool>,
    pub(crate) user_site_directory: ValueSlot<bool>,
    pub(crate) site_import: ValueSlot<bool>,
    pub(crate) write_bytecode: ValueSlot<bool>,
    pub(crate) buffered_stdio: ValueSlot<bool>,
    pub(crate) inspect: ValueSlot<bool>,
    pub(crate) interactive: ValueSlot<bool>,
    pub(crate) quiet: ValueSlot<bool>,
    pub(crate) skip_source_first_line: ValueSlot<bool>,
    pub(crate) faulthandler: ValueSlot<bool>,
    pub(crate) import_time: ValueSlot<bool>,
    pub(crate) dump_refs: ValueSlot<bool>,
    pub(crate) malloc_stats: ValueSlot<bool>,
    pub(crate) verbose: ValueSlot<u8>,
    pub(crate) parser_debug: ValueSlot<u8>,
    pub(crate) optimization_level: ValueSlot<u8>,
    pub(crate) bytes_warning: ValueSlot<u8>,
    pub(crate) tracemalloc: ValueSlot<u16>,
    pub(crate) use_hash_seed: ValueSlot<bool>,
    pub(crate) hash_seed: ValueSlot<u32>,
    pub(crate) use_frozen_modules: ValueSlot<bool>,
    pub(crate) check_hash_pycs_mode: ValueSlot<HashPycsMode>,
    /// Composed warning filters; only derived rules write the override.
    pub(crate) warnoptions: ValueSlot<StringList>,
    /// Warning filters per contributing source, in merge order.
    pub(crate) warn_layers: Vec<(SourceRank, StringList)>,
    /// `-X` options per contributing source, in merge order.
    pub(crate) xoption_layers: Vec<(SourceRank, StringList)>,
    pub(crate) directives: DirectiveGroup,
    /// Winning directive and its rank, once the group is resolved.
    pub(crate) directive: Option<(SourceRank, Directive)>,
}

impl ConfigStore {
    /// Compiled defaults, with the gate fields seeded from the frozen
    /// pre-configuration at their source ranks.
    pub(crate) fn seeded(pre: &FrozenPreConfig) -> Self {
        Self {
            program_name: ValueSlot::new(None),
            home: ValueSlot::new(None),
            prefix: ValueSlot::new(None),
            exec_prefix: ValueSlot::new(None),
            base_prefix: ValueSlot::new(None),
            base_exec_prefix: ValueSlot::new(None),
            executable: ValueSlot::new(None),
            module_search_paths: ValueSlot::new(None),
            pythonpath_env: ValueSlot::new(None),
            pycache_prefix: ValueSlot::new(None),
            filesystem_encoding: ValueSlot::new(None),
            filesystem_errors: ValueSlot::new(None),
            stdio_encoding: ValueSlot::new(None),
            stdio_errors: ValueSlot::new(None),
            argv: ValueSlot::new(None),
            orig_argv: ValueSlot::new(None),
            isolated: pre.seeds.isolated.clone(),
            use_environment: pre.seeds.use_environment.clone(),
            dev_mode: pre.seeds.dev_mode.clone(),
            user_site_directory: ValueSlot::new(true),
            site_import: ValueSlot::new(true),
            write_bytecode: ValueSlot::new(true),
            buffered_stdio: ValueSlot::new(true),
            inspect: ValueSlot::new(false),
            interactive: ValueSlot::new(false),
            quiet: ValueSlot::new(false),
            skip_source_first_line: ValueSlot::new(false),
            faulthandler: ValueSlot::new(false),
            import_time: ValueSlot::new(false),
            dump_refs: ValueSlot::new(false),
            malloc_stats: ValueSlot::new(false),
            verbose: ValueSlot::new(0),
            parser_debug: ValueSlot::new(0),
            optimization_level: ValueSlot::new(0),
            bytes_warning: ValueSlot::new(0),
            tracemalloc: ValueSlot::new(0),
            use_hash_seed: ValueSlot::new(false),
            hash_seed: ValueSlot::new(0),
            use_frozen_modules: ValueSlot::new(true),
            check_hash_pycs_mode: ValueSlot::new(HashPycsMode::Default),
            warnoptions: ValueSlot::new(StringList::new()),
            warn_layers: Vec::new(),
            xoption_layers: Vec::new(),
            directives: DirectiveGroup::default(),
            directive: None,
        }
    }

    /// Merge one source layer into the store.
    ///
    /// # Errors
    ///
    /// Returns a user error when the layer carries a malformed `-X` option.
    pub(crate) fn apply(&mut self, layer: &OverlayLayer<ConfigOverlay>) -> BootResult<()> {
        let rank = layer.rank();
        let overlay = layer.overlay();
        self.write(overlay, rank);
        if let Some(xoptions) = &overlay.xoptions {
            self.write(&implied_fields(xoptions)?, rank);
            self.xoption_layers.push((rank, xoptions.clone()));
        }
        if let Some(warnoptions) = &overlay.warnoptions {
            self.warn_layers.push((rank, warnoptions.clone()));
        }
        if let Some(command) = &overlay.run_command {
            self.directives.offer(Directive::Command(command.clone()), rank);
        }
        if let Some(module) = &overlay.run_module {
            self.directives.offer(Directive::Module(module.clone()), rank);
        }
        if let Some(filename) = &overlay.run_filename {
            self.directives.offer(Directive::Filename(filename.clone()), rank);
        }
        Ok(())
    }

    fn write(&mut self, overlay: &ConfigOverlay, rank: SourceRank) {
        write_optional_fields!(self, overlay, rank;
            program_name,
            home,
            prefix,
            exec_prefix,
            base_prefix,
            base_exec_prefix,
            executable,
            module_search_paths,
            pythonpath_env,
            pycache_prefix,
            filesystem_encoding,
            filesystem_errors,
            stdio_encoding,
            stdio_errors,
            argv,
            orig_argv,
        );
        write_fields!(self, overlay, rank;
            isolated,
            use_environment,
            dev_mode,
            user_site_directory,
            site_import,
            write_bytecode,
            buffered_stdio,
            inspect,
            interactive,
            quiet,
            skip_source_first_line,
            faulthandler,
            import_time,
            dump_refs,
            malloc_stats,
            verbose,
            parser_debug,
            optimization_level,
            bytes_warning,
            tracemalloc,
            use_hash_seed,
            hash_seed,
            use_frozen_modules,
            check_hash_pycs_mode,
        );
    }

    /// `-X` options of every source, lowest rank first.
    pub(crate) fn xoptions(&self) -> StringList {
        let mut layers: Vec<_> = self.xoption_layers.iter().collect();
        layers.sort_by_key(|(rank, _)| *rank);
        layers
            .into_iter()
            .flat_map(|(_, options)| options.iter().map(str::to_owned))
            .collect()
    }

    /// Warning filters contributed at exactly `rank`, in merge order.
    pub(crate) fn warnings_at(&self, rank: SourceRank) -> impl Iterator<Item = &str> {
        self.warn_layers
            .iter()
            .filter(move |(layer_rank, _)| *layer_rank == rank)
            .flat_map(|(_, options)| options.iter())
    }
}

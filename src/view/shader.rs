use std::path::Path;

use crate::error::StartupError;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";
pub const MODEL_UNIFORM: &str = "u_model";

/// One validated WGSL stage, kept with its source for module creation.
#[derive(Debug)]
pub struct ShaderStageSource {
    pub stage: &'static str,
    pub source: String,
    module: naga::Module,
}

impl ShaderStageSource {
    /// Parse and validate WGSL text, and check that the expected entry point exists.
    pub fn compile(
        stage: &'static str,
        source: String,
        entry: &str,
        shader_stage: naga::ShaderStage,
    ) -> Result<Self, StartupError> {
        let module = naga::front::wgsl::parse_str(&source).map_err(|e| StartupError::ShaderCompile {
            stage,
            message: e.emit_to_string(&source),
        })?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| StartupError::ShaderValidate {
                stage,
                message: format!("{e:?}"),
            })?;

        let has_entry = module
            .entry_points
            .iter()
            .any(|ep| ep.name == entry && ep.stage == shader_stage);
        if !has_entry {
            return Err(StartupError::ShaderValidate {
                stage,
                message: format!("missing {shader_stage:?} entry point `{entry}`"),
            });
        }

        Ok(Self { stage, source, module })
    }

    /// Uniform lookup by name. `None` means the transform write has nowhere to go.
    pub fn uniform_binding(&self, name: &str) -> Option<naga::ResourceBinding> {
        self.module
            .global_variables
            .iter()
            .find(|(_, var)| var.space == naga::AddressSpace::Uniform && var.name.as_deref() == Some(name))
            .and_then(|(_, var)| var.binding.clone())
    }

    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.stage),
            source: wgpu::ShaderSource::Wgsl(self.source.as_str().into()),
        })
    }
}

/// The vertex + fragment pair the triangle pipeline is built from.
#[derive(Debug)]
pub struct ShaderSources {
    pub vertex: ShaderStageSource,
    pub fragment: ShaderStageSource,
}

impl ShaderSources {
    pub fn load(vertex_path: &Path, fragment_path: &Path) -> Result<Self, StartupError> {
        let vertex = read_source("vertex", vertex_path)?;
        let fragment = read_source("fragment", fragment_path)?;
        Self::from_sources(vertex, fragment)
    }

    pub fn from_sources(vertex: String, fragment: String) -> Result<Self, StartupError> {
        Ok(Self {
            vertex: ShaderStageSource::compile("vertex", vertex, VERTEX_ENTRY, naga::ShaderStage::Vertex)?,
            fragment: ShaderStageSource::compile(
                "fragment",
                fragment,
                FRAGMENT_ENTRY,
                naga::ShaderStage::Fragment,
            )?,
        })
    }

    /// Where the model matrix binds in the vertex stage, if the shader declares it.
    pub fn model_uniform(&self) -> Option<naga::ResourceBinding> {
        self.vertex.uniform_binding(MODEL_UNIFORM)
    }
}

fn read_source(stage: &'static str, path: &Path) -> Result<String, StartupError> {
    tracing::debug!(stage, path = %path.display(), "reading shader");
    std::fs::read_to_string(path).map_err(|source| StartupError::ShaderRead {
        stage,
        path: path.to_path_buf(),
        source,
    })
}

//! Shader loading and compilation.
//!
//! The vertex and fragment stages live in separate WGSL files and are compiled
//! into separate modules, so a failure names the stage it came from along with
//! the validator's log.

use std::path::Path;

use crate::error::{RenderError, RenderResult};

/// Compiled shader stages, ready for pipeline creation.
pub struct ShaderModules {
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
    pub vertex_entry: String,
    pub fragment_entry: String,
}

/// Builder for creating shader modules.
pub struct ShaderBuilder {
    vertex_source: Option<String>,
    fragment_source: Option<String>,
    vertex_entry: String,
    fragment_entry: String,
    label: Option<String>,
}

impl ShaderBuilder {
    /// Creates a new shader builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertex_source: None,
            fragment_source: None,
            vertex_entry: "vs_main".to_string(),
            fragment_entry: "fs_main".to_string(),
            label: None,
        }
    }

    /// Reads both stages from disk.
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> RenderResult<Self> {
        let vertex = read_source(vertex_path.as_ref())?;
        let fragment = read_source(fragment_path.as_ref())?;
        Ok(Self::new().with_vertex(vertex).with_fragment(fragment))
    }

    /// Sets the vertex shader source (WGSL).
    #[must_use]
    pub fn with_vertex(mut self, source: impl Into<String>) -> Self {
        self.vertex_source = Some(source.into());
        self
    }

    /// Sets the fragment shader source (WGSL).
    #[must_use]
    pub fn with_fragment(mut self, source: impl Into<String>) -> Self {
        self.fragment_source = Some(source.into());
        self
    }

    /// Sets the shader label for debugging.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Compiles both stages.
    pub async fn build(self, device: &wgpu::Device) -> RenderResult<ShaderModules> {
        let vertex_source = self.vertex_source.as_deref().ok_or_else(|| {
            RenderError::ShaderCompilationFailed {
                stage: "vertex",
                log: "missing vertex shader".into(),
            }
        })?;
        let fragment_source = self.fragment_source.as_deref().ok_or_else(|| {
            RenderError::ShaderCompilationFailed {
                stage: "fragment",
                log: "missing fragment shader".into(),
            }
        })?;

        let label = self.label.as_deref().unwrap_or("slice");
        let vertex = compile_stage(device, "vertex", &format!("{label} vertex"), vertex_source).await?;
        let fragment =
            compile_stage(device, "fragment", &format!("{label} fragment"), fragment_source)
                .await?;

        log::info!("Shaders loaded and compiled successfully.");

        Ok(ShaderModules {
            vertex,
            fragment,
            vertex_entry: self.vertex_entry,
            fragment_entry: self.fragment_entry,
        })
    }
}

impl Default for ShaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn read_source(path: &Path) -> RenderResult<String> {
    std::fs::read_to_string(path).map_err(|source| RenderError::ShaderReadFailed {
        path: path.to_path_buf(),
        source,
    })
}

async fn compile_stage(
    device: &wgpu::Device,
    stage: &'static str,
    label: &str,
    source: &str,
) -> RenderResult<wgpu::ShaderModule> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(err) = device.pop_error_scope().await {
        return Err(RenderError::ShaderCompilationFailed {
            stage,
            log: err.to_string(),
        });
    }
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_path() {
        let path = std::env::temp_dir().join("volslice_missing_shader.wgsl");
        let err = ShaderBuilder::from_files(&path, &path)
            .err()
            .expect("missing file should fail");
        match err {
            RenderError::ShaderReadFailed { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let builder = ShaderBuilder::new();
        assert_eq!(builder.vertex_entry, "vs_main");
        assert_eq!(builder.fragment_entry, "fs_main");
        assert!(builder.vertex_source.is_none());
    }
}

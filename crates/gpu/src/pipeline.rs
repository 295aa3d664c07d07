//! Program pipelines composed from separable shader stages.

use crate::driver::Driver;
use crate::error::GpuError;
use crate::handle::PipelineKind;
use crate::object::{GpuObject, ObjectCore, ObjectState};
use crate::shader::{ShaderProgram, ShaderStage};

/// The stage slots a pipeline can be composed from, one per stage kind.
///
/// Vertex plus fragment is the usual minimum; the rest are optional. The
/// pipeline borrows its stages rather than owning them: a stage can feed
/// any number of pipelines, and the borrow keeps it alive (and un-freeable)
/// for as long as a pipeline still references it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineStages<'a> {
    pub vertex: Option<&'a ShaderProgram>,
    pub fragment: Option<&'a ShaderProgram>,
    pub geometry: Option<&'a ShaderProgram>,
    pub tess_control: Option<&'a ShaderProgram>,
    pub tess_evaluation: Option<&'a ShaderProgram>,
}

impl<'a> PipelineStages<'a> {
    /// The common vertex + fragment pair.
    pub fn rendering(vertex: &'a ShaderProgram, fragment: &'a ShaderProgram) -> Self {
        Self {
            vertex: Some(vertex),
            fragment: Some(fragment),
            ..Self::default()
        }
    }

    /// Occupied slots in composition order: vertex, fragment, geometry,
    /// tess-control, tess-evaluation.
    pub fn iter(self) -> impl Iterator<Item = (ShaderStage, &'a ShaderProgram)> {
        [
            (ShaderStage::Vertex, self.vertex),
            (ShaderStage::Fragment, self.fragment),
            (ShaderStage::Geometry, self.geometry),
            (ShaderStage::TessControl, self.tess_control),
            (ShaderStage::TessEvaluation, self.tess_evaluation),
        ]
        .into_iter()
        .filter_map(|(stage, program)| program.map(|program| (stage, program)))
    }

    pub fn is_empty(self) -> bool {
        self.iter().next().is_none()
    }
}

/// A bindable pipeline executing its composed stages together.
#[derive(Debug)]
pub struct ProgramPipeline<'a> {
    core: ObjectCore<PipelineKind>,
    stages: PipelineStages<'a>,
}

impl<'a> ProgramPipeline<'a> {
    /// Rejects a stage set with no stages at all; there is nothing such a
    /// pipeline could execute.
    pub fn new(label: impl Into<String>, stages: PipelineStages<'a>) -> Result<Self, GpuError> {
        let label = label.into();
        if stages.is_empty() {
            return Err(GpuError::EmptyPipeline { name: label });
        }
        Ok(Self {
            core: ObjectCore::new(label),
            stages,
        })
    }

    pub fn stages(&self) -> PipelineStages<'a> {
        self.stages
    }

    /// Compose the pipeline from its stages.
    ///
    /// Every referenced stage is checked before the first driver call, so a
    /// failed build leaves the pipeline `Unallocated`; a pipeline must
    /// never look live while missing a stage.
    pub fn create(&mut self, gl: &dyn Driver) -> Result<(), GpuError> {
        if !self.core.check_valid_for_creation() {
            return Ok(());
        }

        for (stage, program) in self.stages.iter() {
            if program.state() != ObjectState::Live {
                return Err(GpuError::StageNotLive {
                    name: self.core.label().to_owned(),
                    stage,
                });
            }
        }

        let handle = gl.create_pipeline();
        self.core.adopt(handle);
        for (stage, program) in self.stages.iter() {
            gl.use_program_stages(handle, stage.bits(), program.handle());
        }

        Ok(())
    }

    /// Bind the pipeline for subsequent draw calls.
    pub fn bind(&self, gl: &dyn Driver) {
        if !self.core.check_valid_for_use("bind") {
            return;
        }
        gl.bind_pipeline(self.core.handle());
    }
}

impl GpuObject for ProgramPipeline<'_> {
    type Kind = PipelineKind;

    fn core(&self) -> &ObjectCore<PipelineKind> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore<PipelineKind> {
        &mut self.core
    }

    fn delete_handle(&self, gl: &dyn Driver) {
        gl.delete_pipeline(self.core.handle());
    }
}

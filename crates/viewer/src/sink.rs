use islet::render::{DrawCall, RenderSink, UNIFORM_BONE_MATRIX, UNIFORM_MODEL};

/// Stands in for a GPU backend: counts the draw calls and traces their uniforms.
#[derive(Debug, Default)]
pub struct LogSink {
    pub draws: usize,
    pub skinned_draws: usize,
}

impl RenderSink for LogSink {
    fn draw(&mut self, call: &DrawCall<'_>) {
        self.draws += 1;

        let model = call.uniforms.model();
        match call.uniforms.bone_matrices() {
            Some(bone_matrices) => {
                self.skinned_draws += 1;
                tracing::trace!(
                    "draw {} {}={:?} {}[{}]",
                    call.label,
                    UNIFORM_MODEL,
                    model.w_axis.truncate(),
                    UNIFORM_BONE_MATRIX,
                    bone_matrices.len()
                );
            }
            None => {
                tracing::trace!(
                    "draw {} {}={:?}",
                    call.label,
                    UNIFORM_MODEL,
                    model.w_axis.truncate()
                );
            }
        }
    }
}

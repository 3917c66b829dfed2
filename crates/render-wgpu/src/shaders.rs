/// WGSL vertex shader: positions pass through the scene transform.
pub const VERTEX_SHADER: &str = r#"
struct Uniforms {
    transform: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> @builtin(position) vec4<f32> {
    return uniforms.transform * vec4<f32>(vertex.position, 1.0);
}
"#;

/// WGSL fragment shader: a flat orange.
pub const FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.5, 0.2, 1.0);
}
"#;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_are_declared() {
        assert!(VERTEX_SHADER.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(FRAGMENT_SHADER.contains(&format!("fn {FRAGMENT_ENTRY}(")));
    }

    #[test]
    fn vertex_shader_reads_location_zero() {
        assert!(VERTEX_SHADER.contains("@location(0) position: vec3<f32>"));
    }
}

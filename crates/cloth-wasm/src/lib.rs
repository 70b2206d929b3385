use cloth_core::solver::ClothSolver;
use glam::Vec3;
use wasm_bindgen::prelude::*;

/// GPU-compatible vertex: 16 bytes, matches a vec3 + pad layout
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuVertex {
    position: [f32; 3], // 12 bytes
    _pad: f32,          //  4 bytes
}

/// Browser boundary around [`ClothSolver`].
///
/// Owns the frame-driver responsibilities the core does not: clamping the
/// frame delta to `max_dt`, dividing it into `sub_steps`, and keeping a
/// Pod vertex buffer the host reads by pointer after each step.
#[wasm_bindgen]
pub struct ClothWorld {
    solver: ClothSolver,
    sub_steps: u32,
    max_dt: f32,
    gpu_buffer: Vec<GpuVertex>,
}

#[wasm_bindgen]
impl ClothWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(
        segments_x: u32,
        segments_y: u32,
        width: f32,
        height: f32,
    ) -> Result<ClothWorld, JsValue> {
        let solver = ClothSolver::new(segments_x, segments_y, width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        web_sys::console::log_1(
            &format!(
                "WASM ClothWorld created: {}x{} segments, {} particles",
                segments_x,
                segments_y,
                solver.particle_count()
            )
            .into(),
        );

        let gpu_buffer = vec![
            GpuVertex {
                position: [0.0; 3],
                _pad: 0.0,
            };
            solver.particle_count()
        ];

        let mut world = ClothWorld {
            solver,
            sub_steps: 1,
            max_dt: 0.016,
            gpu_buffer,
        };
        world.write_gpu_output();
        Ok(world)
    }

    /// Advance by one display frame. `dt` is clamped to `max_dt` and split
    /// into `sub_steps` core steps. Returns elapsed wall time in ms.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();

        let steps = self.sub_steps.max(1);
        let sub_dt = dt.min(self.max_dt) / steps as f32;
        for _ in 0..steps {
            self.solver.step(sub_dt);
        }

        self.write_gpu_output();
        (js_sys::Date::now() - start) as f32
    }

    #[wasm_bindgen]
    pub fn positions_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn positions_byte_length(&self) -> usize {
        self.gpu_buffer.len() * std::mem::size_of::<GpuVertex>()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particle_count()
    }

    /// Simulation parameters; take effect on the next `step`.
    #[wasm_bindgen]
    pub fn set_params(
        &mut self,
        gravity_x: f32,
        gravity_y: f32,
        gravity_z: f32,
        damping: f32,
        constraint_iterations: u32,
    ) {
        self.solver.config.gravity = Vec3::new(gravity_x, gravity_y, gravity_z);
        self.solver.config.damping = damping;
        self.solver.config.constraint_iterations = constraint_iterations;
    }

    /// Frame-driver parameters: sub-step count and the max frame delta
    /// fed into the core per frame.
    #[wasm_bindgen]
    pub fn set_driver(&mut self, sub_steps: u32, max_dt: f32) {
        self.sub_steps = sub_steps;
        self.max_dt = max_dt;
    }

    /// Nearest particle to a world-space pick point, or -1 if the cloth
    /// is empty.
    #[wasm_bindgen]
    pub fn find_nearest(&self, x: f32, y: f32, z: f32) -> i32 {
        match self.solver.find_nearest(Vec3::new(x, y, z)) {
            Some(index) => index as i32,
            None => -1,
        }
    }

    #[wasm_bindgen]
    pub fn is_pinned(&self, index: usize) -> bool {
        self.solver.is_pinned(index)
    }

    /// Returns false (and does nothing) for pinned or out-of-range
    /// indices, so the host knows whether a drag actually started.
    #[wasm_bindgen]
    pub fn begin_grab(&mut self, index: usize, x: f32, y: f32, z: f32) -> bool {
        self.solver.begin_grab(index, Vec3::new(x, y, z))
    }

    #[wasm_bindgen]
    pub fn update_grab(&mut self, x: f32, y: f32, z: f32) {
        self.solver.update_grab(Vec3::new(x, y, z));
    }

    #[wasm_bindgen]
    pub fn end_grab(&mut self) {
        self.solver.end_grab();
    }

    /// Restore the rest layout. Also releases any active grab, matching
    /// the UI reset button.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.solver.end_grab();
        self.solver.reset();
        self.write_gpu_output();
    }
}

impl ClothWorld {
    fn write_gpu_output(&mut self) {
        for (i, pos) in self.solver.positions().iter().enumerate() {
            self.gpu_buffer[i] = GpuVertex {
                position: [pos.x, pos.y, pos.z],
                _pad: 0.0,
            };
        }
    }
}

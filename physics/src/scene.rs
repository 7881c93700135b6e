use crate::{
    body::{Object, ObjectArena, ObjectHandle},
    config::PhysicsConfig,
    error::Result,
    resolver::{step_rigid_bodies, StepReport},
    shapes::{block_points, diamond_points, random_points, uv_sphere_points},
    transform::Transform,
};
use glam::{Mat3, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

const W: f32 = 50.0;
const H: f32 = 25.0;

fn add_standard_sandbox(objects: &mut ObjectArena) -> Result<()> {
    // ground top face at y = 0
    objects.add_static(
        &block_points(2.0 * W, 1.0, 2.0 * H),
        Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
    )?;

    let wall0 = block_points(2.0, 5.0, 2.0 * H);
    objects.add_static(&wall0, Transform::from_position(Vec3::new(W, 2.5, 0.0)))?;
    objects.add_static(&wall0, Transform::from_position(Vec3::new(-W, 2.5, 0.0)))?;

    let wall1 = block_points(2.0 * W, 5.0, 2.0);
    objects.add_static(&wall1, Transform::from_position(Vec3::new(0.0, 2.5, H)))?;
    objects.add_static(&wall1, Transform::from_position(Vec3::new(0.0, 2.5, -H)))?;
    Ok(())
}

fn add_sphere(objects: &mut ObjectArena) -> Result<()> {
    objects.add_rigid_body(
        &uv_sphere_points(0.5, 16, 8),
        Transform::from_position(Vec3::new(-10.0, 5.0, 0.0)),
        1.0,
    )?;
    Ok(())
}

fn add_diamond(objects: &mut ObjectArena) -> Result<()> {
    objects.add_rigid_body(
        &diamond_points(),
        Transform::from_position(Vec3::new(-10.0, 10.0, 0.0))
            .with_rotation(Mat3::from_rotation_z(0.3)),
        1.0,
    )?;
    Ok(())
}

fn add_box_stack(objects: &mut ObjectArena) -> Result<()> {
    let cube = block_points(1.0, 1.0, 1.0);

    const STACK_HEIGHT: usize = 5;
    for y in 0..STACK_HEIGHT {
        let offset = if y & 1 == 0 { 0.0 } else { 0.15 };
        let delta = 0.04;
        objects.add_rigid_body(
            &cube,
            Transform::from_position(Vec3::new(
                5.0 + offset,
                0.5 + delta + y as f32 * (1.0 + delta),
                offset,
            )),
            1.0,
        )?;
    }
    Ok(())
}

fn add_random_hulls(objects: &mut ObjectArena, seed: u64) -> Result<()> {
    let mut rng = Pcg32::seed_from_u64(seed);
    for i in 0..4 {
        let points = random_points(&mut rng, 1.0, 30);
        objects.add_rigid_body(
            &points,
            Transform::from_position(Vec3::new(-4.0 + 3.0 * i as f32, 4.0, 6.0)),
            2.0,
        )?;
    }
    Ok(())
}

/// An object registry together with the configuration used to step it.
pub struct PhysicsScene {
    objects: ObjectArena,
    config: PhysicsConfig,
    step_num: u64,
    pub paused: bool,
}

impl PhysicsScene {
    pub fn new(config: PhysicsConfig) -> Self {
        PhysicsScene {
            objects: ObjectArena::new(),
            config,
            step_num: 0,
            paused: false,
        }
    }

    /// The demo scene: a walled ground with a ball, a gem, a box stack and a
    /// few random hulls falling onto it.
    pub fn sandbox(config: PhysicsConfig, seed: u64) -> Result<Self> {
        let mut scene = Self::new(config);
        scene.reset(seed)?;
        Ok(scene)
    }

    pub fn reset(&mut self, seed: u64) -> Result<()> {
        self.step_num = 0;
        self.objects.clear();

        add_box_stack(&mut self.objects)?;
        add_sphere(&mut self.objects)?;
        add_diamond(&mut self.objects)?;
        add_random_hulls(&mut self.objects, seed)?;
        add_standard_sandbox(&mut self.objects)?;

        log::debug!("scene reset with {} objects", self.objects.len());
        Ok(())
    }

    pub fn update(&mut self, delta_seconds: f32) -> StepReport {
        if self.paused {
            return StepReport::default();
        }
        self.step_num += 1;
        step_rigid_bodies(
            &mut self.objects,
            delta_seconds,
            self.config.gravity,
            &self.config,
        )
    }

    pub fn add_object(&mut self, object: Object) -> ObjectHandle {
        self.objects.add(object)
    }

    pub fn objects(&self) -> &ObjectArena {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectArena {
        &mut self.objects
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn step_num(&self) -> u64 {
        self.step_num
    }

    pub fn log_bodies(&self) {
        self.objects.log_bodies(self.step_num);
    }
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sandbox_settles_above_ground() {
        let mut scene = PhysicsScene::sandbox(PhysicsConfig::default(), 7).unwrap();
        assert_eq!(scene.objects().len(), 5 + 1 + 1 + 4 + 5);

        let mut contacts = 0;
        for _ in 0..180 {
            contacts += scene.update(1.0 / 60.0).contacts;
        }
        assert_eq!(scene.step_num(), 180);
        assert!(contacts > 0);

        for (_, object) in scene.objects().iter() {
            let pos = object.transform.position;
            assert!(pos.is_finite());
            if object.is_dynamic() {
                // nothing falls through the ground
                assert!(pos.y > -0.1, "object sank to {}", pos);
            }
        }
    }

    #[test]
    fn test_paused_scene_does_not_step() {
        let mut scene = PhysicsScene::sandbox(PhysicsConfig::default(), 1).unwrap();
        scene.paused = true;
        let before: Vec<Vec3> = scene
            .objects()
            .iter()
            .map(|(_, o)| o.transform.position)
            .collect();
        assert_eq!(scene.update(1.0 / 60.0), StepReport::default());
        let after: Vec<Vec3> = scene
            .objects()
            .iter()
            .map(|(_, o)| o.transform.position)
            .collect();
        assert_eq!(before, after);
        assert_eq!(scene.step_num(), 0);
    }
}
